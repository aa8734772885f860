//! # IKBENCH Core
//!
//! Sampling and measurement harness for inverse kinematics solvers.
//!
//! Each trial draws a random joint configuration inside the joint limits,
//! computes the tip pose with forward kinematics, scrambles the robot state
//! and asks the IK solver to recover that pose within a timeout. The harness
//! records success, solve time and pose error for every trial and derives a
//! summary once the run is complete.
//!
//! The kinematics library is not part of this crate. Anything implementing
//! [`KinematicModel`] and [`RobotState`] can be benchmarked.
//!
//! ```ignore
//! use ikbench_core::prelude::*;
//!
//! let params = BenchmarkParams::new("arm", 10_000, Duration::from_millis(50));
//! let sink = CsvResultSink::create("arm_ik_benchmarking_data.csv")?;
//! let mut bench = IkBenchmark::new(params, state, sink, TracingDiagnostics)?;
//! let summary = bench.run(&model)?;
//! println!("{}", summary);
//! ```

pub mod bounds;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod model;
pub mod params;
pub mod pose_error;
pub mod sampler;
pub mod sink;
pub mod stats;

pub use bounds::{extract_joint_bounds, JointBound};
pub use diagnostics::{Diagnostics, SilentDiagnostics, TracingDiagnostics};
pub use driver::{BenchmarkState, IkBenchmark};
pub use error::{BenchError, BenchResult};
pub use model::{JointGroup, KinematicModel, Pose, RobotState, VariableBounds};
pub use params::BenchmarkParams;
pub use pose_error::{evaluate_pose_error, PoseError};
pub use sampler::{JointSampler, SampleConfiguration};
pub use sink::{format_general, CsvResultSink, ResultSink};
pub use stats::{BenchmarkSummary, StatisticsAggregator, TrialRecord};

pub mod prelude {
    pub use crate::{
        BenchError, BenchResult, BenchmarkParams, BenchmarkState, BenchmarkSummary,
        CsvResultSink, Diagnostics, IkBenchmark, JointBound, JointGroup, KinematicModel, Pose,
        ResultSink, RobotState, SilentDiagnostics, TracingDiagnostics, TrialRecord,
        VariableBounds,
    };
    pub use std::time::Duration;
}
