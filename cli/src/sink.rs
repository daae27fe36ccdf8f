use tracing::warn;

use pmumon_collector::{MetricSample, MetricSink};
use pmumon_store::SeriesStore;

/// Bridges emitted samples into the series store.
///
/// Store failures are logged and swallowed here; the collector contract makes
/// persistence outcome invisible to the emitter.
pub struct StoreSink {
    store: SeriesStore,
}

impl StoreSink {
    pub fn new(store: SeriesStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }
}

impl MetricSink for StoreSink {
    fn submit(&mut self, sample: &MetricSample) {
        let series_file = sample.series.series_file(&sample.label);
        if let Err(e) = self
            .store
            .update(&series_file, sample.series.schema(), &sample.formatted())
        {
            warn!(
                series = sample.series.name(),
                label = %sample.label,
                error = %e,
                "Failed to persist sample"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmumon_collector::Series;

    #[test]
    fn test_sink_routes_sample_to_series_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SeriesStore::open(dir.path(), "host-a").unwrap();
        let mut sink = StoreSink::new(store);

        sink.submit(&MetricSample {
            series: Series::Voltage,
            label: "1".to_string(),
            value: 12.6,
        });

        let path = dir.path().join("host-a/battery-1/voltage.rrd");
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("DS:voltage:GAUGE:25:0:U\n"));
        assert!(content.trim_end().ends_with(":12.600"));
    }
}
