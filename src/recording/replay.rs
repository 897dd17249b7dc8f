//! Reading sinks back.
//!
//! # Responsibilities
//! - Parse a JSON-lines sink into observations
//! - Tolerate lines torn by a crash mid-append
//! - Provide the latency history used to warm-start the rolling window

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::recording::observation::Observation;
use crate::recording::recorder::RecordError;

/// Parse every record in `path`. A missing file has no records.
///
/// A line that ends before its JSON object closes is an interrupted append
/// and is dropped, wherever it sits: the recorder starts a fresh line after
/// a torn one. A malformed last line without a trailing newline is dropped
/// too. Any other malformed line is an error.
pub fn read_records(path: &Path) -> Result<Vec<Observation>, RecordError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(RecordError::io(path, e)),
    };

    let torn_tail = !content.is_empty() && !content.ends_with('\n');
    let lines: Vec<&str> = content.lines().collect();
    let mut records = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Observation>(line) {
            Ok(observation) => records.push(observation),
            Err(e) if e.is_eof() || (torn_tail && index + 1 == lines.len()) => {
                tracing::warn!(path = %path.display(), line = index + 1, error = %e, "Skipping truncated record");
            }
            Err(source) => {
                return Err(RecordError::Parse {
                    path: path.to_path_buf(),
                    line: index + 1,
                    source,
                })
            }
        }
    }

    Ok(records)
}

/// Latencies of the last `limit` completed requests, oldest first.
pub fn recent_latencies(records: &[Observation], limit: usize) -> Vec<f64> {
    let mut latencies: Vec<f64> = records
        .iter()
        .rev()
        .filter_map(|observation| observation.outcome.latency_ms())
        .take(limit)
        .collect();
    latencies.reverse();
    latencies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::Outcome;
    use crate::recording::recorder::append_record;
    use chrono::Utc;
    use std::io::Write;

    fn observation(outcome: Outcome) -> Observation {
        Observation {
            timestamp: Utc::now(),
            endpoint: "/health".into(),
            outcome,
            consecutive_failures: 0,
            p95_latency_ms: 0.0,
            error_rate_percent: 0.0,
        }
    }

    fn success(latency_ms: f64) -> Observation {
        observation(Outcome::Success { status_code: 200, latency_ms })
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_records(&dir.path().join("absent.jsonl")).unwrap().is_empty());
    }

    #[test]
    fn test_reads_back_what_was_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");
        append_record(&path, &success(12.5)).unwrap();
        append_record(&path, &observation(Outcome::Failure { error: "down".into() })).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].outcome.latency_ms(), Some(12.5));
        assert_eq!(records[1].outcome, Outcome::Failure { error: "down".into() });

        // Re-emitting the parsed records reproduces the file byte for byte.
        let replayed = dir.path().join("replayed.jsonl");
        for record in &records {
            append_record(&replayed, record).unwrap();
        }
        assert_eq!(fs::read(&path).unwrap(), fs::read(&replayed).unwrap());
    }

    #[test]
    fn test_skips_torn_final_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");
        append_record(&path, &success(1.0)).unwrap();
        let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(br#"{"timestamp":"2026-10-19T08:3"#).unwrap();

        assert_eq!(read_records(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_recovers_after_torn_write_and_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");
        append_record(&path, &success(10.0)).unwrap();
        fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap()
            .write_all(br#"{"timestamp":"2026-10-19T08:3"#)
            .unwrap();
        append_record(&path, &success(20.0)).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(recent_latencies(&records, 100), vec![10.0, 20.0]);
    }

    #[test]
    fn test_malformed_middle_line_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");
        append_record(&path, &success(1.0)).unwrap();
        fs::OpenOptions::new().append(true).open(&path).unwrap().write_all(b"garbage\n").unwrap();
        append_record(&path, &success(2.0)).unwrap();

        match read_records(&path) {
            Err(RecordError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_recent_latencies_skip_failures() {
        let records = vec![
            success(1.0),
            observation(Outcome::Failure { error: "down".into() }),
            success(2.0),
            success(3.0),
        ];
        assert_eq!(recent_latencies(&records, 2), vec![2.0, 3.0]);
        assert_eq!(recent_latencies(&records, 10), vec![1.0, 2.0, 3.0]);
    }
}
