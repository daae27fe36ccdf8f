use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use pmumon_collector::Collector;

use crate::sink::StoreSink;

/// Drive the collector on a fixed cadence until interrupted.
///
/// Ticks are delayed rather than bursted when a cycle overruns, so two cycles
/// never overlap.
pub async fn run(collector: Collector, mut sink: StoreSink, interval: Duration) {
    info!(
        slot_count = collector.slot_count(),
        interval_secs = interval.as_secs(),
        store_root = %sink.store().root().display(),
        "Collector started"
    );

    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut cycles: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                collector.poll(&mut sink);
                cycles += 1;
                debug!(cycles, "Poll cycle complete");
            }
            _ = tokio::signal::ctrl_c() => {
                info!(cycles, "Shutting down");
                break;
            }
        }
    }
}
