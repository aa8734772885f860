//! Benchmark driver: the trial loop and its state machine.
//!
//! ```text
//! Uninitialized --initialize--> Initialized --gather_data--> Running --> Done
//! ```
//!
//! The driver is single-use. It owns the robot state for the whole run and
//! overwrites it on every trial.

use crate::bounds::{extract_joint_bounds, JointBound};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::{BenchError, BenchResult};
use crate::model::{JointGroup, KinematicModel, RobotState};
use crate::params::BenchmarkParams;
use crate::pose_error::evaluate_pose_error;
use crate::sampler::JointSampler;
use crate::sink::ResultSink;
use crate::stats::{BenchmarkSummary, StatisticsAggregator, TrialRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkState {
    Uninitialized,
    Initialized,
    Running,
    Done,
}

impl BenchmarkState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkState::Uninitialized => "uninitialized",
            BenchmarkState::Initialized => "initialized",
            BenchmarkState::Running => "running",
            BenchmarkState::Done => "done",
        }
    }
}

/// Resolved once by `initialize`
#[derive(Debug)]
struct Setup {
    group: JointGroup,
    joint_bounds: Vec<JointBound>,
    sampler: JointSampler,
    tip_link: String,
}

/// IK benchmark over a single planning group
pub struct IkBenchmark<S, K, D = TracingDiagnostics> {
    params: BenchmarkParams,
    robot_state: S,
    sink: K,
    diagnostics: D,
    rng: StdRng,
    state: BenchmarkState,
    setup: Option<Setup>,
    summary: Option<BenchmarkSummary>,
}

impl<S, K, D> IkBenchmark<S, K, D>
where
    S: RobotState,
    K: ResultSink,
    D: Diagnostics,
{
    pub fn new(params: BenchmarkParams, robot_state: S, sink: K, diagnostics: D) -> BenchResult<Self> {
        params.validate()?;

        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            params,
            robot_state,
            sink,
            diagnostics,
            rng,
            state: BenchmarkState::Uninitialized,
            setup: None,
            summary: None,
        })
    }

    /// Resolve the planning group, its joint bounds and the tip link
    pub fn initialize<M>(&mut self, model: &M) -> BenchResult<()>
    where
        M: KinematicModel + ?Sized,
    {
        self.expect_state(BenchmarkState::Uninitialized, "initialize")?;

        let group = model
            .joint_group(&self.params.planning_group)
            .ok_or_else(|| BenchError::GroupNotFound(self.params.planning_group.clone()))?;

        let joint_bounds = extract_joint_bounds(model, &group, &self.diagnostics)?;

        // Tip link, not the end effector
        let tip_link = match group.tip_link() {
            Some(link) => link.to_string(),
            None => {
                self.diagnostics
                    .error("ERROR: The move group is corrupted. Links count is zero.");
                return Err(BenchError::EmptyGroup(group.name.clone()));
            }
        };

        let sampler = JointSampler::new(&joint_bounds)?;

        self.diagnostics.debug(&format!(
            "Benchmarking group '{}' ({} variables) with tip link '{}'",
            group.name,
            group.variable_count(),
            tip_link
        ));

        self.setup = Some(Setup {
            group,
            joint_bounds,
            sampler,
            tip_link,
        });
        self.state = BenchmarkState::Initialized;
        Ok(())
    }

    /// Run all trials and compute the summary
    pub fn gather_data(&mut self) -> BenchResult<BenchmarkSummary> {
        self.expect_state(BenchmarkState::Initialized, "gather data")?;
        self.state = BenchmarkState::Running;

        let mut stats = StatisticsAggregator::new(self.params.sample_size)?;

        for index in 0..self.params.sample_size {
            let record = self.run_trial(index)?;
            self.sink.record(&record)?;
            stats.record(&record);
        }

        let summary = stats.finalize();
        self.diagnostics.info(&summary.to_string());

        self.summary = Some(summary.clone());
        self.state = BenchmarkState::Done;
        Ok(summary)
    }

    /// `initialize` followed by `gather_data`; closes the sink exactly once
    pub fn run<M>(&mut self, model: &M) -> BenchResult<BenchmarkSummary>
    where
        M: KinematicModel + ?Sized,
    {
        self.initialize(model)?;
        let result = self.gather_data();
        let closed = self.sink.close();
        let summary = result?;
        closed?;
        Ok(summary)
    }

    fn run_trial(&mut self, index: usize) -> BenchResult<TrialRecord> {
        let setup = self.setup.as_ref().ok_or(BenchError::InvalidState {
            operation: "run a trial",
            state: self.state.as_str(),
        })?;

        let sample = setup.sampler.sample(&mut self.rng);
        self.diagnostics
            .debug(&format!("The sampled random joint values are: {:?}", sample));

        // FK on the sample gives a target that is reachable by construction
        let target = self.robot_state.compute_forward_kinematics(
            &setup.group,
            &sample,
            &setup.tip_link,
        )?;

        // Start the solver somewhere else
        self.robot_state.randomize_state(&setup.group)?;

        let start = Instant::now();
        let found_ik = self
            .robot_state
            .solve_ik(&setup.group, &target, self.params.ik_timeout);
        let elapsed = start.elapsed();

        if !found_ik {
            return Ok(TrialRecord::failed(index));
        }

        self.robot_state.update_transforms();
        let achieved = self.robot_state.link_pose(&setup.tip_link)?;
        let error = evaluate_pose_error(&target, &achieved);
        let solve_time_us = i64::try_from(elapsed.as_micros()).unwrap_or(i64::MAX);

        Ok(TrialRecord::succeeded(index, solve_time_us, error))
    }

    fn expect_state(&self, expected: BenchmarkState, operation: &'static str) -> BenchResult<()> {
        if self.state != expected {
            return Err(BenchError::InvalidState {
                operation,
                state: self.state.as_str(),
            });
        }
        Ok(())
    }

    pub fn state(&self) -> BenchmarkState {
        self.state
    }

    pub fn calculation_done(&self) -> bool {
        self.state == BenchmarkState::Done
    }

    pub fn params(&self) -> &BenchmarkParams {
        &self.params
    }

    pub fn summary(&self) -> Option<&BenchmarkSummary> {
        self.summary.as_ref()
    }

    pub fn success_rate(&self) -> Option<f64> {
        self.summary.as_ref().map(|s| s.success_rate)
    }

    /// Average successful solve time in microseconds; NaN if nothing succeeded
    pub fn average_solve_time(&self) -> Option<f64> {
        self.summary.as_ref().map(|s| s.average_solve_time_us)
    }

    pub fn joint_bounds(&self) -> &[JointBound] {
        self.setup
            .as_ref()
            .map(|s| s.joint_bounds.as_slice())
            .unwrap_or(&[])
    }

    pub fn tip_link(&self) -> Option<&str> {
        self.setup.as_ref().map(|s| s.tip_link.as_str())
    }

    pub fn robot_state(&self) -> &S {
        &self.robot_state
    }

    pub fn into_sink(self) -> K {
        self.sink
    }
}
