use std::time::Duration;

use color_eyre::eyre::{eyre, Result};

use pmumon_collector::{Collector, MetricSample, MetricSink, PathTemplate};
use pmumon_store::SeriesStore;

use crate::config::{config_path, UserConfig};
use crate::poller;
use crate::sink::StoreSink;

fn build_collector(config: &UserConfig) -> Result<Collector> {
    let template = PathTemplate::new(&config.slot_path_template)?;
    Ok(Collector::discover(template))
}

fn open_store(config: &UserConfig) -> Result<SeriesStore> {
    let data_dir = config.effective_data_dir();
    let host = config.effective_hostname();
    Ok(SeriesStore::open(&data_dir, &host)?)
}

/// Foreground poll loop until Ctrl+C.
pub fn run(config: &UserConfig, interval_override: Option<String>) -> Result<()> {
    let interval = match interval_override {
        Some(s) => humantime::parse_duration(&s)
            .map_err(|e| eyre!("invalid --interval {:?}: {}", s, e))?,
        None => Duration::from_secs(config.poll_interval_secs),
    };
    if interval.is_zero() {
        return Err(eyre!("poll interval must be greater than zero"));
    }

    let collector = build_collector(config)?;
    let sink = StoreSink::new(open_store(config)?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(poller::run(collector, sink, interval));

    Ok(())
}

/// Run a single poll cycle, for hosts that schedule externally (cron etc).
pub fn once(config: &UserConfig, json: bool) -> Result<()> {
    let collector = build_collector(config)?;

    if json {
        let mut samples: Vec<MetricSample> = Vec::new();
        collector.poll(&mut samples);
        println!("{}", serde_json::to_string_pretty(&samples)?);
        return Ok(());
    }

    let mut sink = CountingSink::new(StoreSink::new(open_store(config)?));
    collector.poll(&mut sink);
    println!(
        "Polled {} slot(s), persisted {} sample(s).",
        collector.slot_count(),
        sink.submitted
    );
    Ok(())
}

/// Print the result of slot discovery.
pub fn slots(config: &UserConfig) -> Result<()> {
    let collector = build_collector(config)?;
    println!("Slot path template: {}", config.slot_path_template);
    println!("Slots discovered:   {}", collector.slot_count());
    Ok(())
}

/// Print series store statistics.
pub fn status(config: &UserConfig) -> Result<()> {
    let store = open_store(config)?;
    let stats = store.stats()?;

    println!("Series Store");
    println!("{}", "-".repeat(40));
    println!("Root:         {}", store.root().display());
    println!("Series files: {}", stats.series_count);
    println!("Total size:   {} bytes", stats.size_bytes);
    Ok(())
}

/// Print the effective configuration.
pub fn show_config(config: &UserConfig) -> Result<()> {
    println!("Config file:  {}", config_path().display());
    println!("{}", "-".repeat(40));
    print!("{}", toml::to_string_pretty(config)?);
    println!("{}", "-".repeat(40));
    println!("Data dir:     {}", config.effective_data_dir().display());
    println!("Host label:   {}", config.effective_hostname());
    Ok(())
}

struct CountingSink {
    inner: StoreSink,
    submitted: usize,
}

impl CountingSink {
    fn new(inner: StoreSink) -> Self {
        Self {
            inner,
            submitted: 0,
        }
    }
}

impl MetricSink for CountingSink {
    fn submit(&mut self, sample: &MetricSample) {
        self.inner.submit(sample);
        self.submitted += 1;
    }
}
