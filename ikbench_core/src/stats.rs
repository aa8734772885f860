//! Per-trial records and run statistics.

use crate::error::{BenchError, BenchResult};
use crate::pose_error::PoseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one sample-FK-IK-measure cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Zero-based trial index
    pub index: usize,
    pub success: bool,
    pub solve_time_us: Option<i64>,
    pub position_error: Option<f64>,
    pub orientation_error: Option<f64>,
}

impl TrialRecord {
    pub fn succeeded(index: usize, solve_time_us: i64, error: PoseError) -> Self {
        Self {
            index,
            success: true,
            solve_time_us: Some(solve_time_us),
            position_error: Some(error.position),
            orientation_error: Some(error.orientation),
        }
    }

    pub fn failed(index: usize) -> Self {
        Self {
            index,
            success: false,
            solve_time_us: None,
            position_error: None,
            orientation_error: None,
        }
    }
}

/// Final statistics of a run.
///
/// Timing fields only consider successful trials. With zero successes
/// `average_solve_time_us` is NaN and the percentile fields are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub sample_size: usize,
    pub success_count: usize,
    pub success_rate: f64,
    pub average_solve_time_us: f64,
    pub min_solve_time_us: Option<i64>,
    pub max_solve_time_us: Option<i64>,
    pub median_solve_time_us: Option<i64>,
    pub p95_solve_time_us: Option<i64>,
    pub p99_solve_time_us: Option<i64>,
}

impl BenchmarkSummary {
    /// False when no trial succeeded and the timing fields are sentinels
    pub fn has_timing(&self) -> bool {
        self.success_count > 0
    }

    pub fn failure_count(&self) -> usize {
        self.sample_size - self.success_count
    }
}

impl fmt::Display for BenchmarkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_timing() {
            write!(
                f,
                "Success rate = {:.6} and average IK solving time is {:.6} microseconds",
                self.success_rate, self.average_solve_time_us
            )
        } else {
            write!(
                f,
                "Success rate = {:.6} and average IK solving time is n/a (no successful trials)",
                self.success_rate
            )
        }
    }
}

/// Running counters for a single benchmark run
#[derive(Debug, Clone)]
pub struct StatisticsAggregator {
    sample_size: usize,
    trials_seen: usize,
    success_count: usize,
    solve_times: Vec<i64>,
}

impl StatisticsAggregator {
    pub fn new(sample_size: usize) -> BenchResult<Self> {
        if sample_size == 0 {
            return Err(BenchError::InvalidSampleSize);
        }
        Ok(Self {
            sample_size,
            trials_seen: 0,
            success_count: 0,
            solve_times: Vec::with_capacity(sample_size),
        })
    }

    pub fn record(&mut self, record: &TrialRecord) {
        self.trials_seen += 1;
        if let (true, Some(solve_time)) = (record.success, record.solve_time_us) {
            self.success_count += 1;
            self.solve_times.push(solve_time);
        }
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn trials_seen(&self) -> usize {
        self.trials_seen
    }

    /// Successful solve times, in trial order
    pub fn solve_times(&self) -> &[i64] {
        &self.solve_times
    }

    pub fn finalize(&self) -> BenchmarkSummary {
        let success_rate = self.success_count as f64 / self.sample_size as f64;

        let average_solve_time_us = if self.solve_times.is_empty() {
            f64::NAN
        } else {
            self.solve_times.iter().map(|&t| t as f64).sum::<f64>() / self.solve_times.len() as f64
        };

        let mut sorted = self.solve_times.clone();
        sorted.sort_unstable();

        BenchmarkSummary {
            sample_size: self.sample_size,
            success_count: self.success_count,
            success_rate,
            average_solve_time_us,
            min_solve_time_us: sorted.first().copied(),
            max_solve_time_us: sorted.last().copied(),
            median_solve_time_us: percentile(&sorted, 50),
            p95_solve_time_us: percentile(&sorted, 95),
            p99_solve_time_us: percentile(&sorted, 99),
        }
    }
}

/// Element at index `len * p / 100` of sorted data, clamped to the last.
///
/// With an even count the median is the upper middle element.
fn percentile(sorted: &[i64], p: usize) -> Option<i64> {
    if sorted.is_empty() {
        return None;
    }
    let idx = (sorted.len() * p / 100).min(sorted.len() - 1);
    Some(sorted[idx])
}
