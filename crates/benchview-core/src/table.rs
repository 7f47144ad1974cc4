//! Result table loading
//!
//! A result table is a CSV file with a header row. Every row must carry a
//! dataset name (`data_name`, or the older `dataset_name`) and an
//! `objective_name`; all other columns are kept as text and read by name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Column holding the dataset name
pub const DATASET_COLUMN: &str = "data_name";
/// Accepted alias for [`DATASET_COLUMN`]
pub const DATASET_COLUMN_ALIAS: &str = "dataset_name";
/// Column holding the objective name
pub const OBJECTIVE_COLUMN: &str = "objective_name";

/// Errors raised while loading a table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read table '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table '{}': {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl TableError {
    /// Path of the table that failed to load
    pub fn path(&self) -> &Path {
        match self {
            TableError::Io { path, .. } | TableError::Malformed { path, .. } => path,
        }
    }
}

pub type TableResult<T> = Result<T, TableError>;

/// Column names of a table, shared by all of its rows
#[derive(Debug)]
pub struct Header {
    names: Vec<String>,
    index: HashMap<String, usize>,
    dataset: usize,
    objective: usize,
}

impl Header {
    fn new(names: Vec<String>) -> Result<Self, String> {
        let index: HashMap<String, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let dataset = index
            .get(DATASET_COLUMN)
            .or_else(|| index.get(DATASET_COLUMN_ALIAS))
            .copied()
            .ok_or_else(|| format!("missing required column '{DATASET_COLUMN}'"))?;
        let objective = index
            .get(OBJECTIVE_COLUMN)
            .copied()
            .ok_or_else(|| format!("missing required column '{OBJECTIVE_COLUMN}'"))?;

        Ok(Self {
            names,
            index,
            dataset,
            objective,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// One measurement row
#[derive(Debug, Clone)]
pub struct Row {
    header: Arc<Header>,
    values: Vec<String>,
}

impl Row {
    pub fn dataset(&self) -> &str {
        &self.values[self.header.dataset]
    }

    pub fn objective(&self) -> &str {
        &self.values[self.header.objective]
    }

    /// Raw text of a field, if the column exists
    pub fn get(&self, field: &str) -> Option<&str> {
        self.header
            .position(field)
            .map(|i| self.values[i].as_str())
    }

    /// Numeric value of a field; empty or non-numeric cells yield `None`
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f64>().ok())
    }
}

/// A loaded result table, rows in file order
#[derive(Debug, Clone)]
pub struct Table {
    path: PathBuf,
    header: Arc<Header>,
    rows: Vec<Row>,
}

impl Table {
    /// Read a CSV result table from disk
    pub fn load(path: &Path) -> TableResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(path, file)
    }

    /// Parse a CSV result table from any reader; `path` is used for error reporting
    pub fn from_reader<R: std::io::Read>(path: &Path, reader: R) -> TableResult<Self> {
        let malformed = |reason: String| TableError::Malformed {
            path: path.to_path_buf(),
            reason,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let names = reader
            .headers()
            .map_err(|e| malformed(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let header = Arc::new(Header::new(names).map_err(malformed)?);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| malformed(e.to_string()))?;
            rows.push(Row {
                header: Arc::clone(&header),
                values: record.iter().map(str::to_string).collect(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            header,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &[String] {
        self.header.names()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Distinct values in order of first appearance
pub(crate) fn distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn parse(csv: &str) -> Table {
    Table::from_reader(Path::new("test.csv"), csv.as_bytes()).unwrap()
}
