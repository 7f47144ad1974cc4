use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use benchview_cli::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --log-level / --verbose
    let env_filter = EnvFilter::builder()
        .with_default_directive(cli.level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let summary = benchview_cli::run(&cli)?;
    println!(
        "Wrote {} results across {} benchmarks ({} pages, {} figures)",
        summary.result_count(),
        summary.collections.len(),
        summary.pages_written,
        summary.figures_written
    );
    Ok(())
}
