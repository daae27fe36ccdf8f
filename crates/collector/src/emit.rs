use serde::Serialize;
use tracing::{debug, trace};

use crate::reader::read_slot;
use crate::reading::{Reading, Series};
use crate::slots::{self, PathTemplate};

/// One validated quantity ready for submission, tagged by series and slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSample {
    pub series: Series,
    /// Slot index rendered as a decimal string.
    pub label: String,
    pub value: f64,
}

impl MetricSample {
    /// Tagged-gauge wire form: freshness marker plus the value to 3 places.
    pub fn formatted(&self) -> String {
        format!("N:{:.3}", self.value)
    }
}

/// Destination for emitted samples, injected by the host.
///
/// Submission is fire-and-forget: the collector never inspects persistence
/// outcome, so implementations handle their own failures.
pub trait MetricSink {
    fn submit(&mut self, sample: &MetricSample);
}

impl MetricSink for Vec<MetricSample> {
    fn submit(&mut self, sample: &MetricSample) {
        self.push(sample.clone());
    }
}

/// The discovery-poll-parse-submit pipeline.
///
/// Construction runs slot discovery exactly once; the slot count is fixed for
/// the collector's lifetime. Each [`Collector::poll`] call is one independent
/// cycle over all known slots.
#[derive(Debug)]
pub struct Collector {
    template: PathTemplate,
    slot_count: usize,
}

impl Collector {
    /// Probe the slot path template and fix the slot count.
    pub fn discover(template: PathTemplate) -> Self {
        let slot_count = slots::discover(&template);
        debug!(slot_count, "Discovered battery slots");
        Self {
            template,
            slot_count,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Run one poll cycle: read every known slot in order and submit each
    /// strictly positive quantity. A slot with no status data this cycle is
    /// skipped without affecting the others.
    pub fn poll(&self, sink: &mut dyn MetricSink) {
        for index in 0..self.slot_count {
            let Some(reading) = read_slot(&self.template, index) else {
                trace!(slot = index, "No status data this cycle");
                continue;
            };
            self.submit_reading(index, &reading, sink);
        }
    }

    fn submit_reading(&self, index: usize, reading: &Reading, sink: &mut dyn MetricSink) {
        let label = index.to_string();
        for series in Series::ALL {
            let value = reading.value(series);
            if !Reading::emits(value) {
                continue;
            }
            trace!(series = series.name(), label = %label, value, "Submitting sample");
            sink.submit(&MetricSample {
                series,
                label: label.clone(),
                value,
            });
        }
    }
}
