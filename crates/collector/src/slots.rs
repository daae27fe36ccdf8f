use std::fs::File;
use std::path::PathBuf;

/// Slot status files exposed by the PowerPC PMU driver.
pub const DEFAULT_SLOT_PATH_TEMPLATE: &str = "/proc/pmu/battery_{index}";

/// Rendered slot paths longer than this are treated as "no such slot".
const MAX_PATH_BYTES: usize = 512;

const INDEX_PLACEHOLDER: &str = "{index}";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("slot path template must contain exactly one {{index}} placeholder: {0}")]
    MissingPlaceholder(String),
}

/// A slot-resource path pattern with a single integer placeholder.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    prefix: String,
    suffix: String,
}

impl PathTemplate {
    pub fn new(pattern: &str) -> Result<Self, TemplateError> {
        match pattern.split_once(INDEX_PLACEHOLDER) {
            Some((prefix, suffix)) if !suffix.contains(INDEX_PLACEHOLDER) => Ok(Self {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            }),
            _ => Err(TemplateError::MissingPlaceholder(pattern.to_string())),
        }
    }

    /// Render the path for one slot index.
    ///
    /// Returns `None` when the rendered path exceeds the length bound; callers
    /// treat that the same as an inaccessible slot.
    pub fn render(&self, index: usize) -> Option<PathBuf> {
        let path = format!("{}{}{}", self.prefix, index, self.suffix);
        if path.len() > MAX_PATH_BYTES {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

impl Default for PathTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_PATH_TEMPLATE).expect("default template is well-formed")
    }
}

/// Count the battery slots reachable through `template`.
///
/// Probes indices 0, 1, 2, ... and stops at the first path that cannot be
/// rendered or opened for reading. Zero is a valid result; slots found here
/// are fixed for the process lifetime.
pub fn discover(template: &PathTemplate) -> usize {
    let mut count = 0;
    loop {
        let Some(path) = template.render(count) else {
            break;
        };
        if File::open(&path).is_err() {
            break;
        }
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn slot_template(dir: &std::path::Path) -> PathTemplate {
        PathTemplate::new(&format!("{}/battery_{{index}}", dir.display())).unwrap()
    }

    #[test]
    fn test_template_requires_placeholder() {
        assert!(PathTemplate::new("/proc/pmu/battery_0").is_err());
        assert!(PathTemplate::new("/proc/pmu/battery_{index}").is_ok());
        assert!(PathTemplate::new("{index}/{index}").is_err());
    }

    #[test]
    fn test_render_substitutes_index() {
        let template = PathTemplate::new("/proc/pmu/battery_{index}").unwrap();
        assert_eq!(
            template.render(3),
            Some(PathBuf::from("/proc/pmu/battery_3"))
        );
    }

    #[test]
    fn test_render_rejects_overlong_path() {
        let long_prefix = "x".repeat(600);
        let template = PathTemplate::new(&format!("{}{{index}}", long_prefix)).unwrap();
        assert_eq!(template.render(0), None);
    }

    #[test]
    fn test_discover_counts_contiguous_slots() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..3 {
            fs::write(dir.path().join(format!("battery_{}", i)), "charge xx 1000\n").unwrap();
        }

        assert_eq!(discover(&slot_template(dir.path())), 3);
    }

    #[test]
    fn test_discover_returns_zero_without_slots() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(discover(&slot_template(dir.path())), 0);
    }

    #[test]
    fn test_discover_stops_at_first_gap() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("battery_0"), "").unwrap();
        fs::write(dir.path().join("battery_2"), "").unwrap();

        assert_eq!(discover(&slot_template(dir.path())), 1);
    }

    #[test]
    fn test_discover_stops_on_unrenderable_path() {
        let template = PathTemplate {
            prefix: "x".repeat(MAX_PATH_BYTES + 1),
            suffix: String::new(),
        };
        assert_eq!(discover(&template), 0);
    }
}
