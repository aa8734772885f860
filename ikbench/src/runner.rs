//! Runs one benchmark per configured IK solver

use crate::config::BenchmarkConfig;
use anyhow::{Context, Result};
use ikbench_core::{BenchmarkSummary, CsvResultSink, IkBenchmark, TracingDiagnostics};
use ikbench_kinematics::{ChainState, RobotModel, SolverSettings};
use serde::Serialize;
use std::path::PathBuf;

/// Result of benchmarking a single solver
#[derive(Debug, Clone, Serialize)]
pub struct SolverReport {
    pub solver: String,
    pub settings: SolverSettings,
    pub data_file: PathBuf,
    pub summary: BenchmarkSummary,
}

pub fn load_model(config: &BenchmarkConfig) -> Result<RobotModel> {
    RobotModel::load(&config.urdf, config.groups.clone())
        .with_context(|| format!("Failed to load robot model from {}", config.urdf.display()))
}

/// Benchmark `solver` with a fresh robot state and its own data file
pub fn run_solver(
    config: &BenchmarkConfig,
    model: &RobotModel,
    solver: &SolverSettings,
) -> Result<SolverReport> {
    let params = config.params()?;
    let data_file = config.data_file_path(&solver.name);

    tracing::info!(
        "Running calculations for IK solver '{}' ({} samples, timeout {:?})",
        solver.name,
        params.sample_size,
        params.ik_timeout
    );

    let state = ChainState::new(model, solver, params.state_seed())
        .with_context(|| format!("Failed to build robot state for solver '{}'", solver.name))?;
    let sink = CsvResultSink::create(&data_file)
        .with_context(|| format!("Failed to create data file {}", data_file.display()))?;

    let mut bench = IkBenchmark::new(params, state, sink, TracingDiagnostics)?;
    let summary = bench
        .run(model)
        .with_context(|| format!("Benchmark for solver '{}' failed", solver.name))?;

    tracing::info!(
        "Solver '{}' finished after {} IK attempts, data written to {}",
        solver.name,
        bench.robot_state().ik_attempts(),
        data_file.display()
    );

    Ok(SolverReport {
        solver: solver.name.clone(),
        settings: solver.clone(),
        data_file,
        summary,
    })
}

/// Run every selected solver in order; the first fatal error aborts the run
pub fn run_all(config: &BenchmarkConfig, only: Option<&str>) -> Result<Vec<SolverReport>> {
    config.validate()?;
    let solvers = config.selected_solvers(only)?;
    let model = load_model(config)?;

    solvers
        .into_iter()
        .map(|solver| run_solver(config, &model, solver))
        .collect()
}
