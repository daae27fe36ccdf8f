use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::reading::Reading;
use crate::slots::PathTemplate;

/// Status lines are tokenized into at most this many fields; anything past
/// the cap is ignored rather than treated as an error.
const MAX_FIELDS: usize = 8;

/// Read and parse one slot's status resource.
///
/// Returns `None` when the resource cannot be opened (battery removed at
/// runtime, permissions) -- that is "no reading this cycle", not an error,
/// and must not affect other slots.
pub fn read_slot(template: &PathTemplate, index: usize) -> Option<Reading> {
    let path = template.render(index)?;
    let file = File::open(&path).ok()?;

    let mut reading = Reading::default();
    for line in BufReader::new(file).lines() {
        let Ok(line) = line else {
            break;
        };
        parse_line(&line, &mut reading);
    }

    Some(reading)
}

/// Parse one status line into the reading.
///
/// Format: `<name> <unit> <magnitude> ...`, whitespace separated. Lines with
/// fewer than three fields and unrecognized names are skipped. Magnitudes are
/// milli-scale; malformed magnitudes parse to 0.0 by policy.
fn parse_line(line: &str, reading: &mut Reading) {
    let mut fields = [""; MAX_FIELDS];
    let mut numfields = 0;
    for token in line.split_whitespace().take(MAX_FIELDS) {
        fields[numfields] = token;
        numfields += 1;
    }

    if numfields < 3 {
        return;
    }

    let magnitude = fields[2].parse::<f64>().unwrap_or(0.0) / 1000.0;
    match fields[0] {
        "current" => reading.current = magnitude,
        "voltage" => reading.voltage = magnitude,
        "charge" => reading.charge = magnitude,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn template_for(dir: &Path) -> PathTemplate {
        PathTemplate::new(&format!("{}/battery_{{index}}", dir.display())).unwrap()
    }

    fn parse(text: &str) -> Reading {
        let mut reading = Reading::default();
        for line in text.lines() {
            parse_line(line, &mut reading);
        }
        reading
    }

    #[test]
    fn test_parses_single_field() {
        let reading = parse("current xx 1500\n");
        assert_eq!(reading.current, 1.5);
        assert_eq!(reading.voltage, 0.0);
        assert_eq!(reading.charge, 0.0);
    }

    #[test]
    fn test_parses_all_fields_in_milli_units() {
        let reading = parse("current mA 2500\nvoltage mV 12600\ncharge mAh 4400\n");
        assert_eq!(reading.current, 2.5);
        assert_eq!(reading.voltage, 12.6);
        assert_eq!(reading.charge, 4.4);
    }

    #[test]
    fn test_ignores_unrecognized_fields() {
        let reading = parse("temperature C 42000\nflags : 0x1\n");
        assert_eq!(reading, Reading::default());
    }

    #[test]
    fn test_ignores_short_lines() {
        // "current 1500" has only two fields, so the magnitude slot is missing.
        let reading = parse("current 1500\nvoltage\n\n");
        assert_eq!(reading, Reading::default());
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        let reading = parse("Current xx 1500\nVOLTAGE xx 12000\n");
        assert_eq!(reading, Reading::default());
    }

    #[test]
    fn test_malformed_magnitude_parses_to_zero() {
        let reading = parse("voltage xx abc\ncurrent xx 1500\n");
        assert_eq!(reading.voltage, 0.0);
        assert_eq!(reading.current, 1.5);
    }

    #[test]
    fn test_extra_fields_beyond_cap_are_ignored() {
        let reading = parse("current xx 1000 a b c d e f g h\n");
        assert_eq!(reading.current, 1.0);
    }

    #[test]
    fn test_last_occurrence_wins_within_one_pass() {
        let reading = parse("charge xx 1000\ncharge xx 2000\n");
        assert_eq!(reading.charge, 2.0);
    }

    #[test]
    fn test_missing_slot_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_slot(&template_for(dir.path()), 0), None);
    }

    #[test]
    fn test_reads_slot_from_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("battery_0"),
            "flags : 0x11\ncharge xx 3600\nvoltage xx 12450\n",
        )
        .unwrap();

        let reading = read_slot(&template_for(dir.path()), 0).unwrap();
        assert_eq!(reading.charge, 3.6);
        assert_eq!(reading.voltage, 12.45);
        assert_eq!(reading.current, 0.0);
    }

    #[test]
    fn test_each_read_starts_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("battery_0");
        let template = template_for(dir.path());

        fs::write(&path, "current xx 1500\n").unwrap();
        let first = read_slot(&template, 0).unwrap();
        assert_eq!(first.current, 1.5);

        // A later cycle must not carry the old current value forward.
        fs::write(&path, "voltage xx 12000\n").unwrap();
        let second = read_slot(&template, 0).unwrap();
        assert_eq!(second.current, 0.0);
        assert_eq!(second.voltage, 12.0);
    }
}
