use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::Level;

use pmumon_collector::DEFAULT_SLOT_PATH_TEMPLATE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "off" => LogLevel::Off,
            "error" => LogLevel::Error,
            "warn" => LogLevel::Warn,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn as_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_slot_path_template() -> String {
    DEFAULT_SLOT_PATH_TEMPLATE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Slot status path pattern with an `{index}` placeholder.
    #[serde(default = "default_slot_path_template")]
    pub slot_path_template: String,

    /// Root for series files; defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Host label for the series root; defaults to the system hostname.
    pub hostname: Option<String>,

    pub log_level: LogLevel,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            slot_path_template: default_slot_path_template(),
            data_dir: None,
            hostname: None,
            log_level: LogLevel::Info,
        }
    }
}

impl UserConfig {
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(series_dir)
    }

    pub fn effective_hostname(&self) -> String {
        self.hostname.clone().unwrap_or_else(|| {
            hostname::get()
                .map(|h| h.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "localhost".to_string())
        })
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("pmumon")
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("pmumon")
}

pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("pmumon")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn series_dir() -> PathBuf {
    data_dir().join("series")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UserConfig::default();
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.slot_path_template, "/proc/pmu/battery_{index}");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: UserConfig = toml::from_str("poll_interval_secs = 30").unwrap();
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.slot_path_template, "/proc/pmu/battery_{index}");
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_lossy("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_lossy("nonsense"), LogLevel::Info);
        assert_eq!(LogLevel::Off.as_tracing_level(), None);
    }

    #[test]
    fn test_hostname_override_wins() {
        let config = UserConfig {
            hostname: Some("rack-7".to_string()),
            ..UserConfig::default()
        };
        assert_eq!(config.effective_hostname(), "rack-7");
    }
}
