//! Building the result record of one table
//!
//! A [`BenchmarkResult`] carries everything its page needs: identifier,
//! chart artifacts, and links to the raw table. Nothing is looked up in the
//! original table after it is built.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::chart::{ArtifactMode, ChartRegistry};
use crate::context::RunContext;
use crate::error::{ReportError, ReportResult};
use crate::grouping::group_charts;
use crate::naming::{artifact_name, identifier_for, page_name};
use crate::table::{distinct, Table};

/// Where a chart ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartArtifact {
    /// Figure file, relative to the output root
    File(PathBuf),
    /// Markup embedded in the result page
    Inline(String),
}

/// One chart of a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    pub dataset: String,
    pub objective: String,
    pub kind: String,
    pub artifact: ChartArtifact,
}

/// Fully resolved output of processing one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    pub identifier: String,
    pub collection: String,
    /// Input table the result was built from
    pub source: PathBuf,
    /// Copy of the input table, relative to the output root
    pub table_copy: PathBuf,
    pub charts: Vec<ChartEntry>,
    pub datasets: Vec<String>,
    pub objectives: Vec<String>,
    pub solvers: Vec<String>,
    pub row_count: usize,
    pub page_name: String,
    /// Modification time of the input table
    pub modified: Option<DateTime<Utc>>,
}

impl BenchmarkResult {
    /// Charts of one (dataset, objective) group, in kind order
    pub fn charts_for<'a>(
        &'a self,
        dataset: &'a str,
        objective: &'a str,
    ) -> impl Iterator<Item = &'a ChartEntry> + 'a {
        self.charts
            .iter()
            .filter(move |c| c.dataset == dataset && c.objective == objective)
    }

    /// Number of charts written as figure files
    pub fn figure_count(&self) -> usize {
        self.charts
            .iter()
            .filter(|c| matches!(c.artifact, ChartArtifact::File(_)))
            .count()
    }
}

/// Builds results for the tables of a run
pub struct ResultBuilder<'a> {
    ctx: &'a RunContext,
    registry: &'a ChartRegistry,
    kinds: &'a [String],
}

impl<'a> ResultBuilder<'a> {
    pub fn new(ctx: &'a RunContext, registry: &'a ChartRegistry, kinds: &'a [String]) -> Self {
        Self {
            ctx,
            registry,
            kinds,
        }
    }

    /// Load `input_path`, copy it to the output tree, chart it, and persist its figures
    pub fn build(&self, collection: &str, input_path: &Path) -> ReportResult<BenchmarkResult> {
        self.registry.validate(self.kinds)?;

        info!("Processing table: {}", input_path.display());
        let table = Table::load(input_path)?;
        let table_copy = self.copy_input(collection, input_path)?;

        let grouping = group_charts(&table, self.kinds, self.registry)?;
        let identifier = identifier_for(input_path, self.ctx.input_root());

        let figures_rel = self.ctx.figures_rel(collection);
        let mut sequence = 0usize;
        let mut charts = Vec::with_capacity(grouping.chart_count);
        for group in grouping.groups {
            for (kind, figure) in group.figures {
                let artifact = match self.registry.mode(&kind)? {
                    ArtifactMode::Inline => ChartArtifact::Inline(figure.markup().to_string()),
                    ArtifactMode::File => {
                        let rel = figures_rel.join(artifact_name(&identifier, sequence));
                        sequence += 1;
                        let path = self.ctx.output_path(&rel);
                        if let Some(parent) = path.parent() {
                            std::fs::create_dir_all(parent)
                                .map_err(|e| ReportError::output_write(parent, e))?;
                        }
                        figure
                            .save(&path)
                            .map_err(|e| ReportError::output_write(&path, e))?;
                        debug!("Wrote figure {}", path.display());
                        ChartArtifact::File(rel)
                    }
                };
                charts.push(ChartEntry {
                    dataset: group.dataset.clone(),
                    objective: group.objective.clone(),
                    kind,
                    artifact,
                });
            }
        }

        let rows = table.rows();
        Ok(BenchmarkResult {
            page_name: page_name(&identifier),
            identifier,
            collection: collection.to_string(),
            source: input_path.to_path_buf(),
            table_copy,
            charts,
            datasets: grouping.datasets,
            objectives: distinct(rows.iter().map(|r| r.objective())),
            solvers: distinct(rows.iter().filter_map(|r| r.get("solver_name"))),
            row_count: rows.len(),
            modified: modified_time(input_path),
        })
    }

    /// Copy the raw table to `outputs/<collection>/<path within collection>`
    fn copy_input(&self, collection: &str, input_path: &Path) -> ReportResult<PathBuf> {
        let collection_dir = self.ctx.collection_dir(collection);
        let within = input_path
            .strip_prefix(&collection_dir)
            .ok()
            .map(Path::to_path_buf)
            .or_else(|| input_path.file_name().map(PathBuf::from))
            .unwrap_or_default();
        let rel = self.ctx.tables_rel(collection).join(within);
        let dest = self.ctx.output_path(&rel);

        let copy = || -> std::io::Result<()> {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(input_path, &dest)?;
            Ok(())
        };
        copy().map_err(|source| ReportError::InputCopy {
            path: dest.clone(),
            source,
        })?;
        debug!("Copied {} to {}", input_path.display(), dest.display());
        Ok(rel)
    }
}

fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}
