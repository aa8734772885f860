//! Console comparison table and JSON summary export

use crate::config::BenchmarkConfig;
use crate::runner::SolverReport;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything needed to compare runs later
#[derive(Debug, Serialize)]
pub struct SummaryDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub urdf: &'a Path,
    pub planning_group: &'a str,
    pub sample_size: usize,
    pub ik_timeout_s: f64,
    pub seed: Option<u64>,
    pub results: &'a [SolverReport],
}

impl<'a> SummaryDocument<'a> {
    pub fn new(config: &'a BenchmarkConfig, results: &'a [SolverReport]) -> Self {
        Self {
            generated_at: Utc::now(),
            urdf: &config.urdf,
            planning_group: &config.planning_group,
            sample_size: config.sample_size,
            ik_timeout_s: config.ik_timeout,
            seed: config.seed,
            results,
        }
    }
}

pub fn write_summary_json(
    path: &Path,
    config: &BenchmarkConfig,
    results: &[SolverReport],
) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let document = SummaryDocument::new(config, results);
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write summary {}", path.display()))?;
    Ok(path.to_path_buf())
}

fn micros(value: Option<i64>) -> String {
    value
        .map(|v| format!("{} us", v))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Render the comparison table as plain lines
pub fn format_table(results: &[SolverReport]) -> Vec<String> {
    let mut lines = vec![format!(
        "  {:<24} {:>9} {:>14} {:>12} {:>12}",
        "Solver", "Success", "Avg time", "Median", "P95"
    )];

    for report in results {
        let s = &report.summary;
        let average = if s.has_timing() {
            format!("{:.1} us", s.average_solve_time_us)
        } else {
            "n/a".to_string()
        };
        lines.push(format!(
            "  {:<24} {:>8.2}% {:>14} {:>12} {:>12}",
            report.solver,
            s.success_rate * 100.0,
            average,
            micros(s.median_solve_time_us),
            micros(s.p95_solve_time_us),
        ));
    }
    lines
}

pub fn print_report(config: &BenchmarkConfig, results: &[SolverReport]) {
    println!("\n{}", "═".repeat(80).bright_cyan().bold());
    println!("{}", "  IK BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(80).bright_cyan().bold());

    println!("\n{}", "Benchmark Configuration:".bright_yellow());
    println!("  • Robot description: {}", config.urdf.display());
    println!("  • Planning group: {}", config.planning_group.bright_green());
    println!(
        "  • Samples per solver: {}",
        format!("{}", config.sample_size).bright_green()
    );
    println!("  • IK timeout: {} s", config.ik_timeout);
    match config.seed {
        Some(seed) => println!("  • Seed: {}", seed),
        None => println!("  • Seed: random"),
    }
    println!();

    let mut lines = format_table(results).into_iter();
    if let Some(header) = lines.next() {
        println!("{}", header.bright_white().bold());
    }
    for (line, report) in lines.zip(results) {
        let rate = report.summary.success_rate;
        if rate >= 0.99 {
            println!("{}", line.bright_green());
        } else if rate >= 0.9 {
            println!("{}", line.bright_yellow());
        } else {
            println!("{}", line.bright_red());
        }
    }

    println!("\n{}", "Data files:".bright_yellow());
    for report in results {
        println!("  • {}: {}", report.solver, report.data_file.display());
    }

    println!("\n{}", "═".repeat(80).bright_cyan().bold());
    println!();
}
