//! Error types for report generation

use std::path::PathBuf;
use thiserror::Error;

use crate::chart::ChartError;
use crate::config::ConfigError;
use crate::table::TableError;
use crate::template::TemplateError;

/// Errors that abort a report run
///
/// Every variant is fatal: a run either writes a complete report or fails
/// with one of these, naming the offending file, kind, or pattern.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A requested chart kind is not registered
    #[error("unknown chart kind '{kind}' (available: {})", available.join(", "))]
    UnknownChartKind {
        kind: String,
        available: Vec<String>,
    },

    /// A result table could not be read or parsed
    #[error(transparent)]
    TableLoad(#[from] TableError),

    /// The raw input table could not be copied into the output tree
    #[error("failed to copy input table to '{}': {source}", path.display())]
    InputCopy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file or directory could not be written
    #[error("failed to write '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A chart generator failed on one group
    #[error("chart '{kind}' failed for dataset '{dataset}', objective '{objective}': {source}")]
    Chart {
        kind: String,
        dataset: String,
        objective: String,
        #[source]
        source: ChartError,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A file-name pattern is not a valid glob
    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// An input directory could not be listed
    #[error("failed to read input directory '{}': {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two input tables map to the same output identifier
    #[error(
        "identifier '{identifier}' is produced by both '{}' and '{}'",
        first.display(),
        second.display()
    )]
    IdentifierCollision {
        identifier: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Two pages of one run would be written to the same file
    #[error("page '{page}' would be written for both {first} and {second}")]
    PageCollision {
        page: String,
        first: String,
        second: String,
    },
}

impl ReportError {
    pub(crate) fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;
