//! Run parameters resolved before a benchmark starts

use crate::error::{BenchError, BenchResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters of a single benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkParams {
    /// Joint group to benchmark
    pub planning_group: String,
    /// Number of trials
    pub sample_size: usize,
    /// Per-call IK timeout
    pub ik_timeout: Duration,
    /// Fixed seed for the joint sampler. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl BenchmarkParams {
    pub fn new(planning_group: impl Into<String>, sample_size: usize, ik_timeout: Duration) -> Self {
        Self {
            planning_group: planning_group.into(),
            sample_size,
            ik_timeout,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build from a timeout in seconds, as found in config files
    pub fn from_secs_f64(
        planning_group: impl Into<String>,
        sample_size: usize,
        ik_timeout_secs: f64,
    ) -> BenchResult<Self> {
        if !(ik_timeout_secs.is_finite() && ik_timeout_secs > 0.0) {
            return Err(BenchError::InvalidTimeout(ik_timeout_secs));
        }
        let ik_timeout = Duration::try_from_secs_f64(ik_timeout_secs)
            .map_err(|_| BenchError::InvalidTimeout(ik_timeout_secs))?;
        Ok(Self::new(planning_group, sample_size, ik_timeout))
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.planning_group.trim().is_empty() {
            return Err(BenchError::MissingPlanningGroup);
        }
        if self.sample_size == 0 {
            return Err(BenchError::InvalidSampleSize);
        }
        if self.ik_timeout.is_zero() {
            return Err(BenchError::InvalidTimeout(0.0));
        }
        Ok(())
    }

    /// Seed for the robot state's own randomization, derived from `seed`
    pub fn state_seed(&self) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(1))
    }
}
