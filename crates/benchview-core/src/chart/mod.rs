//! Chart generator registry
//!
//! Maps chart-kind identifiers to generators. A generator turns the rows of
//! one (dataset, objective) group into a [`Figure`]; the registry also
//! records whether a kind's figures are written as files or embedded inline.

mod kinds;
mod series;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::error::{ReportError, ReportResult};
use crate::grouping::Group;

pub use kinds::{
    bar_chart, histogram, objective_curve, relative_suboptimality_curve, suboptimality_curve,
};

/// Errors raised by chart generators
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("required column '{0}' is missing or not numeric")]
    MissingField(&'static str),

    #[error("no plottable points")]
    NoData,

    #[error("drawing failed: {0}")]
    Draw(String),
}

pub type ChartResult<T> = Result<T, ChartError>;

/// A rendered chart, kept as an SVG document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    svg: String,
}

impl Figure {
    /// File extension for persisted figures
    pub const EXTENSION: &'static str = "svg";

    pub fn from_svg(svg: impl Into<String>) -> Self {
        Self { svg: svg.into() }
    }

    /// Markup suitable for embedding directly in a page
    pub fn markup(&self) -> &str {
        &self.svg
    }

    /// Persist the figure as an image file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.svg.as_bytes())
    }
}

/// How the figures of one chart kind end up in a result page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactMode {
    /// Written to `figures/` and referenced by path
    #[default]
    File,
    /// Embedded directly as markup
    Inline,
}

/// Produces a figure from the rows of one group
///
/// Implementations must depend on nothing but the group they are given.
pub trait ChartGenerator: Send + Sync {
    fn generate(&self, group: &Group<'_>) -> ChartResult<Figure>;
}

impl<F> ChartGenerator for F
where
    F: Fn(&Group<'_>) -> ChartResult<Figure> + Send + Sync,
{
    fn generate(&self, group: &Group<'_>) -> ChartResult<Figure> {
        self(group)
    }
}

#[derive(Clone)]
struct Entry {
    generator: Arc<dyn ChartGenerator>,
    mode: ArtifactMode,
}

/// Registry of available chart kinds
#[derive(Clone, Default)]
pub struct ChartRegistry {
    entries: BTreeMap<String, Entry>,
}

impl ChartRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in chart kind
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("objective_curve", objective_curve);
        registry.register("suboptimality_curve", suboptimality_curve);
        registry.register(
            "relative_suboptimality_curve",
            relative_suboptimality_curve,
        );
        registry.register("bar_chart", bar_chart);
        registry.register("histogram", histogram);
        registry
    }

    /// Register (or replace) a kind with file artifacts
    pub fn register<G>(&mut self, kind: impl Into<String>, generator: G)
    where
        G: ChartGenerator + 'static,
    {
        self.register_with_mode(kind, generator, ArtifactMode::File);
    }

    pub fn register_with_mode<G>(&mut self, kind: impl Into<String>, generator: G, mode: ArtifactMode)
    where
        G: ChartGenerator + 'static,
    {
        self.entries.insert(
            kind.into(),
            Entry {
                generator: Arc::new(generator),
                mode,
            },
        );
    }

    /// Change the artifact mode of a registered kind
    pub fn set_mode(&mut self, kind: &str, mode: ArtifactMode) -> ReportResult<()> {
        let available = self.kinds();
        let entry = self
            .entries
            .get_mut(kind)
            .ok_or_else(|| ReportError::UnknownChartKind {
                kind: kind.to_string(),
                available,
            })?;
        entry.mode = mode;
        Ok(())
    }

    pub fn get(&self, kind: &str) -> ReportResult<&dyn ChartGenerator> {
        self.entry(kind).map(|e| e.generator.as_ref())
    }

    pub fn mode(&self, kind: &str) -> ReportResult<ArtifactMode> {
        self.entry(kind).map(|e| e.mode)
    }

    /// Fail on the first kind that is not registered
    pub fn validate<S: AsRef<str>>(&self, kinds: &[S]) -> ReportResult<()> {
        for kind in kinds {
            self.entry(kind.as_ref())?;
        }
        Ok(())
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    fn entry(&self, kind: &str) -> ReportResult<&Entry> {
        self.entries
            .get(kind)
            .ok_or_else(|| ReportError::UnknownChartKind {
                kind: kind.to_string(),
                available: self.kinds(),
            })
    }
}

impl std::fmt::Debug for ChartRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, e)| (k, e.mode)))
            .finish()
    }
}
