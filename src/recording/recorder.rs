//! Append-only JSON-lines sinks.
//!
//! # Responsibilities
//! - Create missing parent directories
//! - Append one compact JSON object plus newline per call
//! - Write the general log and the metrics stream independently
//!
//! # Design Decisions
//! - The file is opened, written, flushed and closed on every append, so
//!   no handle outlives a cycle and only a final line can be torn by a crash
//! - A torn final line is closed off with a newline before the next append,
//!   so the fragment never swallows a complete record
//! - At-most-once: a failed write is reported, never retried or buffered

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::config::LoggingConfig;
use crate::recording::observation::Observation;

/// Errors raised while writing or reading a sink.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{path}:{line}: malformed record: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl RecordError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        RecordError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Append `record` as a single JSON line to `path`.
pub fn append_record<T: Serialize>(path: &Path, record: &T) -> Result<(), RecordError> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RecordError::io(parent, e))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| RecordError::io(path, e))?;

    if ends_mid_line(&mut file).map_err(|e| RecordError::io(path, e))? {
        line.insert(0, '\n');
    }

    // One write_all per line keeps each record contiguous for tailers.
    file.write_all(line.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| RecordError::io(path, e))
}

/// True when the file is non-empty and its last byte is not a newline.
fn ends_mid_line(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Which sink an append targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Log,
    Metrics,
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Log => f.write_str("log"),
            Sink::Metrics => f.write_str("metrics"),
        }
    }
}

/// A sink that could not be written this cycle.
#[derive(Debug)]
pub struct SinkFailure {
    pub sink: Sink,
    pub error: RecordError,
}

/// Writes every observation to both configured sinks.
#[derive(Debug, Clone)]
pub struct Recorder {
    log_file: PathBuf,
    metrics_file: PathBuf,
}

impl Recorder {
    pub fn new(log_file: impl Into<PathBuf>, metrics_file: impl Into<PathBuf>) -> Self {
        Self {
            log_file: log_file.into(),
            metrics_file: metrics_file.into(),
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::new(&config.log_file, &config.metrics_file)
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn metrics_file(&self) -> &Path {
        &self.metrics_file
    }

    /// Attempt both appends; returns the sinks that failed.
    pub fn record(&self, observation: &Observation) -> Vec<SinkFailure> {
        [(Sink::Log, &self.log_file), (Sink::Metrics, &self.metrics_file)]
            .into_iter()
            .filter_map(|(sink, path)| {
                append_record(path, observation)
                    .err()
                    .map(|error| SinkFailure { sink, error })
            })
            .collect()
    }
}
