//! Command-line harness that benchmarks IK solvers for a robot description

pub mod cli;
pub mod config;
pub mod report;
pub mod runner;

pub use cli::Cli;
pub use config::BenchmarkConfig;
pub use runner::{run_all, run_solver, SolverReport};
