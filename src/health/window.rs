//! Rolling latency window.
//!
//! # Responsibilities
//! - Hold the most recent latency samples, oldest first
//! - Evict the oldest sample once capacity is exceeded
//! - Answer nearest-rank percentile and mean queries
//!
//! # Design Decisions
//! - Percentile uses index `floor(p * len)` on the sorted samples, without
//!   interpolation, so p95 of `1..=100` is 96
//! - An empty window reports 0 rather than an error

use std::collections::VecDeque;

/// Default number of samples kept.
pub const DEFAULT_CAPACITY: usize = 100;

/// Fixed-capacity FIFO buffer of latency samples in milliseconds.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl RollingWindow {
    /// Create an empty window. A zero capacity is raised to 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append a sample, evicting the oldest one if the window overflows.
    pub fn append(&mut self, latency_ms: f64) {
        self.samples.push_back(latency_ms);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Nearest-rank percentile for `p` in `[0, 1]`.
    pub fn percentile(&self, p: f64) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }

        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let rank = (p * sorted.len() as f64).floor();
        let index = if rank.is_nan() || rank < 0.0 {
            0
        } else {
            (rank as usize).min(sorted.len() - 1)
        };
        sorted[index]
    }

    /// 95th percentile, the figure carried on every observation.
    pub fn p95(&self) -> f64 {
        self.percentile(0.95)
    }

    /// Arithmetic mean, or 0 when empty.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Most recently appended sample.
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Extend<f64> for RollingWindow {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for latency_ms in iter {
            self.append(latency_ms);
        }
    }
}
