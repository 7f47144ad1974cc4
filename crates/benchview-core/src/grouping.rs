//! Grouping of table rows by (dataset, objective)
//!
//! Groups are derived from the pairs that actually occur in a table; a pair
//! with no rows is never materialized. Grouping is pure: figures are
//! returned to the caller, which decides how to persist them.

use tracing::debug;

use crate::chart::{ChartRegistry, Figure};
use crate::error::{ReportError, ReportResult};
use crate::table::{distinct, Row, Table};

/// The rows of one table matching a (dataset, objective) pair
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub dataset: &'a str,
    pub objective: &'a str,
    pub rows: Vec<&'a Row>,
}

impl<'a> Group<'a> {
    pub fn new(dataset: &'a str, objective: &'a str, rows: Vec<&'a Row>) -> Self {
        Self {
            dataset,
            objective,
            rows,
        }
    }
}

/// Figures produced for one (dataset, objective) pair, in requested-kind order
#[derive(Debug, Clone)]
pub struct GroupCharts {
    pub dataset: String,
    pub objective: String,
    pub figures: Vec<(String, Figure)>,
}

/// Output of grouping one table
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    /// Groups ordered by dataset, then objective, by first appearance
    pub groups: Vec<GroupCharts>,
    /// Distinct dataset names in order of first appearance
    pub datasets: Vec<String>,
    /// Number of figures produced
    pub chart_count: usize,
}

impl Grouping {
    /// Figure for one (dataset, objective, kind), if it was produced
    pub fn figure(&self, dataset: &str, objective: &str, kind: &str) -> Option<&Figure> {
        self.groups
            .iter()
            .find(|g| g.dataset == dataset && g.objective == objective)
            .and_then(|g| g.figures.iter().find(|(k, _)| k == kind))
            .map(|(_, figure)| figure)
    }

    /// Objectives present for a dataset, in order of first appearance
    pub fn objectives(&self, dataset: &str) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|g| g.dataset == dataset)
            .map(|g| g.objective.as_str())
            .collect()
    }
}

/// Partition `table` by (dataset, objective) and run every requested kind on each group
///
/// Every kind is checked against the registry before any generator runs, so
/// an invalid request produces nothing.
pub fn group_charts<S: AsRef<str>>(
    table: &Table,
    kinds: &[S],
    registry: &ChartRegistry,
) -> ReportResult<Grouping> {
    registry.validate(kinds)?;

    let datasets = distinct(table.rows().iter().map(Row::dataset));
    let mut grouping = Grouping {
        datasets: datasets.clone(),
        ..Grouping::default()
    };

    for dataset in &datasets {
        let dataset_rows: Vec<&Row> = table
            .rows()
            .iter()
            .filter(|r| r.dataset() == dataset)
            .collect();
        let objectives = distinct(dataset_rows.iter().map(|r| r.objective()));

        for objective in &objectives {
            let rows = dataset_rows
                .iter()
                .copied()
                .filter(|r| r.objective() == objective)
                .collect();
            let group = Group::new(dataset, objective, rows);

            let mut figures = Vec::with_capacity(kinds.len());
            for kind in kinds {
                let kind = kind.as_ref();
                let figure = registry
                    .get(kind)?
                    .generate(&group)
                    .map_err(|source| ReportError::Chart {
                        kind: kind.to_string(),
                        dataset: dataset.clone(),
                        objective: objective.clone(),
                        source,
                    })?;
                debug!(%dataset, %objective, kind, "generated chart");
                figures.push((kind.to_string(), figure));
                grouping.chart_count += 1;
            }

            grouping.groups.push(GroupCharts {
                dataset: dataset.clone(),
                objective: objective.clone(),
                figures,
            });
        }
    }

    Ok(grouping)
}
