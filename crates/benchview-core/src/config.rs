//! Report configuration
//!
//! Read from an optional `benchview.toml`:
//!
//! ```toml
//! title = "Benchmark results"
//! kinds = ["objective_curve", "suboptimality_curve"]
//! inline_kinds = ["objective_curve"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::chart::{ArtifactMode, ChartRegistry};
use crate::error::ReportResult;

/// File name looked up under the project root
pub const CONFIG_FILE: &str = "benchview.toml";

/// Errors raised while reading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// What to chart and how pages are titled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Title shown on every page
    pub title: String,
    /// Chart kinds produced for every group, in display order
    pub kinds: Vec<String>,
    /// Kinds whose figures are embedded in the page instead of written to `figures/`
    pub inline_kinds: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Benchmark results".to_string(),
            kinds: vec![
                "objective_curve".to_string(),
                "suboptimality_curve".to_string(),
                "relative_suboptimality_curve".to_string(),
                "bar_chart".to_string(),
            ],
            inline_kinds: Vec::new(),
        }
    }
}

impl ReportConfig {
    /// Load `path`, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Apply `inline_kinds` to the registry
    pub fn apply(&self, registry: &mut ChartRegistry) -> ReportResult<()> {
        for kind in &self.inline_kinds {
            registry.set_mode(kind, ArtifactMode::Inline)?;
        }
        Ok(())
    }
}
