use serde::{Deserialize, Serialize};

/// The three metric series a battery slot reports into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    Current,
    Voltage,
    Charge,
}

impl Series {
    pub const ALL: [Series; 3] = [Series::Current, Series::Voltage, Series::Charge];

    /// Name of the metric series as submitted to the sink.
    pub fn name(&self) -> &'static str {
        match self {
            Series::Current => "battery_current",
            Series::Voltage => "battery_voltage",
            Series::Charge => "battery_charge",
        }
    }

    /// Field name in the slot status text, also the data-source name on disk.
    pub fn field_name(&self) -> &'static str {
        match self {
            Series::Current => "current",
            Series::Voltage => "voltage",
            Series::Charge => "charge",
        }
    }

    /// Data-source schema written on series-file creation.
    ///
    /// Gauge with a 25 second heartbeat, lower bound 0, no upper bound.
    pub fn schema(&self) -> &'static str {
        match self {
            Series::Current => "DS:current:GAUGE:25:0:U",
            Series::Voltage => "DS:voltage:GAUGE:25:0:U",
            Series::Charge => "DS:charge:GAUGE:25:0:U",
        }
    }

    /// Series file path relative to the store's per-host root.
    pub fn series_file(&self, label: &str) -> String {
        format!("battery-{}/{}.rrd", label, self.field_name())
    }
}

/// Parsed quantities for one slot in one poll cycle, in base units.
///
/// Every cycle starts from a zero-initialized reading; a field is overwritten
/// at most once per read pass and never carried over from a previous cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reading {
    pub current: f64,
    pub voltage: f64,
    pub charge: f64,
}

impl Reading {
    pub fn value(&self, series: Series) -> f64 {
        match series {
            Series::Current => self.current,
            Series::Voltage => self.voltage,
            Series::Charge => self.charge,
        }
    }

    /// Emission gate: only strictly positive values are submitted. Zero means
    /// the field was absent or idle; negatives never come from real hardware
    /// but are suppressed by the same rule.
    pub fn emits(value: f64) -> bool {
        value > 0.0
    }
}
