//! Benchview CLI library
//!
//! Argument parsing lives in [`cli`]; [`run`] loads the configuration,
//! builds the chart registry, and drives one report run.

pub mod cli;

use anyhow::{Context, Result};
use benchview_core::{
    ChartRegistry, ReportAssembler, ReportConfig, ReportSummary, RunContext, CONFIG_FILE,
};
use tracing::{debug, info};

use crate::cli::Cli;

/// Generate the report described by the parsed arguments
pub fn run(cli: &Cli) -> Result<ReportSummary> {
    let config_path = cli.root.join(CONFIG_FILE);
    let config = ReportConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    debug!(?config, "Loaded configuration");

    let mut registry = ChartRegistry::with_builtin();
    config
        .apply(&mut registry)
        .context("Invalid inline_kinds in configuration")?;

    let ctx = RunContext::from_root(&cli.root);
    info!(
        "Generating report from {} into {}",
        ctx.input_root().display(),
        ctx.output_root().display()
    );

    let assembler = ReportAssembler::new(ctx, registry, config.kinds, config.title);
    assembler
        .run(&cli.benchmarks, &cli.patterns)
        .context("Report generation failed")
}
