use anyhow::Result;
use ikbench::{report, runner, BenchmarkConfig, Cli};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(&cli) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    tracing::info!("Loading benchmark config from {}", cli.config.display());
    let mut config = BenchmarkConfig::load(&cli.config)?;
    config.apply_overrides(cli);

    let results = runner::run_all(&config, cli.solver.as_deref())?;
    report::print_report(&config, &results);

    if let Some(path) = &cli.summary_json {
        let written = report::write_summary_json(path, &config, &results)?;
        tracing::info!("Summary written to {}", written.display());
    }
    Ok(())
}
