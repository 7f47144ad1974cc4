use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages (default)
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "benchview")]
#[command(about = "Generate a static HTML report from benchmark result tables")]
#[command(version)]
pub struct Cli {
    /// Only include result files matching this pattern (can be repeated)
    #[arg(short = 'k', long = "pattern", value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Only include this benchmark (can be repeated; defaults to all)
    #[arg(short = 'b', long = "benchmark", value_name = "NAME")]
    pub benchmarks: Vec<String>,

    /// Project root holding `outputs/` (input) and `html/` (report)
    #[arg(long, env = "BENCHVIEW_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Effective log level: explicit level, then `--verbose`, then info
    pub fn level(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_everything() {
        let cli = Cli::try_parse_from(["benchview"]).unwrap();
        assert!(cli.patterns.is_empty());
        assert!(cli.benchmarks.is_empty());
        assert_eq!(cli.level(), LevelFilter::INFO);
    }

    #[test]
    fn repeated_filters_accumulate() {
        let cli = Cli::try_parse_from([
            "benchview", "-k", "lasso*", "--pattern", "ridge*", "-b", "smooth", "-b", "nonsmooth",
        ])
        .unwrap();
        assert_eq!(cli.patterns, vec!["lasso*", "ridge*"]);
        assert_eq!(cli.benchmarks, vec!["smooth", "nonsmooth"]);
    }

    #[test]
    fn explicit_level_wins_over_verbose() {
        let cli = Cli::try_parse_from(["benchview", "-v", "--log-level", "warn"]).unwrap();
        assert_eq!(cli.level(), LevelFilter::WARN);

        let cli = Cli::try_parse_from(["benchview", "-v"]).unwrap();
        assert_eq!(cli.level(), LevelFilter::DEBUG);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["benchview", "--display"]).is_err());
    }
}
