//! Benchmark configuration file
//!
//! ```toml
//! urdf = "robots/six_dof_arm.urdf"
//! planning_group = "manipulator"
//! sample_size = 10000
//! ik_timeout = 0.05
//!
//! [[groups]]
//! name = "manipulator"
//! tip_link = "tool0"
//!
//! [[ik_solvers]]
//! name = "jacobian_default"
//! ```

use crate::cli::Cli;
use anyhow::{bail, Context, Result};
use ikbench_core::BenchmarkParams;
use ikbench_kinematics::{GroupDefinition, SolverSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchmarkConfig {
    /// Robot description; relative paths resolve against the config file
    pub urdf: PathBuf,
    pub planning_group: String,
    pub sample_size: usize,
    /// Seconds per IK call
    pub ik_timeout: f64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub groups: Vec<GroupDefinition>,
    #[serde(default = "default_solvers")]
    pub ik_solvers: Vec<SolverSettings>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_solvers() -> Vec<SolverSettings> {
    vec![SolverSettings::default()]
}

impl BenchmarkConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if config.urdf.is_relative() {
            if let Some(dir) = path.parent() {
                config.urdf = dir.join(&config.urdf);
            }
        }
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Command-line values win over the file
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(group) = &cli.group {
            self.planning_group = group.clone();
        }
        if let Some(sample_size) = cli.sample_size {
            self.sample_size = sample_size;
        }
        if let Some(ik_timeout) = cli.ik_timeout {
            self.ik_timeout = ik_timeout;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(output_dir) = &cli.output_dir {
            self.output_dir = output_dir.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.params()?.validate()?;

        if self.ik_solvers.is_empty() {
            bail!("At least one IK solver must be configured");
        }

        let mut names = HashSet::new();
        for solver in &self.ik_solvers {
            if solver.name.is_empty()
                || solver.name.contains(|c: char| c == '/' || c == '\\' || c.is_whitespace())
            {
                bail!("Invalid IK solver name '{}'", solver.name);
            }
            if !names.insert(solver.name.as_str()) {
                bail!("Duplicate IK solver name '{}'", solver.name);
            }
        }
        Ok(())
    }

    pub fn params(&self) -> Result<BenchmarkParams> {
        let mut params =
            BenchmarkParams::from_secs_f64(&self.planning_group, self.sample_size, self.ik_timeout)?;
        params.seed = self.seed;
        Ok(params)
    }

    /// Solvers to run, optionally restricted to one name
    pub fn selected_solvers(&self, only: Option<&str>) -> Result<Vec<&SolverSettings>> {
        match only {
            None => Ok(self.ik_solvers.iter().collect()),
            Some(name) => match self.ik_solvers.iter().find(|s| s.name == name) {
                Some(solver) => Ok(vec![solver]),
                None => bail!(
                    "Unknown IK solver '{}'. Configured solvers: {}",
                    name,
                    self.ik_solvers
                        .iter()
                        .map(|s| s.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            },
        }
    }

    pub fn data_file_path(&self, solver: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_ik_benchmarking_data.csv", solver))
    }
}
