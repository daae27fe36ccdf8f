//! Persistent storage for submitted metric series.
//!
//! Each series lives in its own append-only file under a per-host root,
//! created on first write with a `DS:` schema line. Samples arrive in the
//! tagged-gauge wire form (`N:<value>`); the freshness marker is resolved to
//! the current unix timestamp at append time.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use tracing::debug;

/// Errors that can occur during series storage operations
#[derive(Debug, thiserror::Error)]
pub enum SeriesStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("series file path must be relative to the store root: {0}")]
    InvalidSeriesPath(String),
}

pub type Result<T> = std::result::Result<T, SeriesStoreError>;

/// Series storage rooted at `<data_dir>/<host>`.
pub struct SeriesStore {
    root: PathBuf,
}

impl SeriesStore {
    /// Open or create the per-host series root.
    pub fn open(data_dir: &Path, host: &str) -> Result<Self> {
        let root = data_dir.join(host);
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "Series store opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Append one sample to a series file, creating the file with its schema
    /// line on first write.
    ///
    /// `series_file` is relative to the store root (e.g.
    /// `battery-0/current.rrd`); `sample` is the wire form, whose leading `N`
    /// marker is replaced with the current unix timestamp.
    pub fn update(&self, series_file: &str, schema: &str, sample: &str) -> Result<()> {
        let path = self.resolve(series_file)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !path.exists() {
            let mut file = File::create(&path)?;
            writeln!(file, "{}", schema)?;
            debug!(series = series_file, schema, "Created series file");
        }

        let mut file = OpenOptions::new().append(true).open(&path)?;
        writeln!(file, "{}", resolve_freshness(sample))?;
        Ok(())
    }

    /// Series file count and total size, for status reporting.
    pub fn stats(&self) -> Result<StoreStats> {
        let mut stats = StoreStats::default();
        collect_stats(&self.root, &mut stats)?;
        Ok(stats)
    }

    fn resolve(&self, series_file: &str) -> Result<PathBuf> {
        let relative = Path::new(series_file);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if series_file.is_empty() || !plain {
            return Err(SeriesStoreError::InvalidSeriesPath(series_file.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

/// Replace a leading `N` freshness marker with the current unix timestamp.
fn resolve_freshness(sample: &str) -> String {
    match sample.strip_prefix("N:") {
        Some(rest) => format!("{}:{}", Utc::now().timestamp(), rest),
        None => sample.to_string(),
    }
}

fn collect_stats(dir: &Path, stats: &mut StoreStats) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_stats(&path, stats)?;
        } else {
            stats.series_count += 1;
            stats.size_bytes += entry.metadata()?.len();
        }
    }
    Ok(())
}

/// Store statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreStats {
    pub series_count: u64,
    pub size_bytes: u64,
}
