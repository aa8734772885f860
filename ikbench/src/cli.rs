use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "ikbench")]
#[command(about = "Benchmark IK solvers on random reachable poses", long_about = None)]
pub struct Cli {
    /// Benchmark configuration (TOML)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Planning group to benchmark (overrides config)
    #[arg(short, long)]
    pub group: Option<String>,

    /// Number of trials per solver (overrides config)
    #[arg(short = 'n', long)]
    pub sample_size: Option<usize>,

    /// IK timeout in seconds (overrides config)
    #[arg(short = 't', long)]
    pub ik_timeout: Option<f64>,

    /// Seed for reproducible sampling (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for per-solver data files (overrides config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Only run the named solver
    #[arg(short, long)]
    pub solver: Option<String>,

    /// Write all summaries to this JSON file
    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        Parser::parse()
    }
}
