//! PMU battery telemetry collection for pmumon.
//!
//! This crate implements the discovery-poll-parse-submit pipeline: it finds
//! the battery slots the kernel exposes under a templated path, reads each
//! slot's status text once per poll cycle, converts the raw milli-scale
//! values into base units, and hands validated samples to a [`MetricSink`].
//!
//! # Example
//!
//! ```ignore
//! use pmumon_collector::{Collector, PathTemplate};
//!
//! let template = PathTemplate::new("/proc/pmu/battery_{index}")?;
//! let collector = Collector::discover(template);
//! collector.poll(&mut sink);
//! ```

mod emit;
mod reader;
mod reading;
mod slots;

pub use emit::{Collector, MetricSample, MetricSink};
pub use reader::read_slot;
pub use reading::{Reading, Series};
pub use slots::{PathTemplate, TemplateError, DEFAULT_SLOT_PATH_TEMPLATE};
