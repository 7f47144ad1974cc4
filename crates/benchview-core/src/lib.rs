//! # Benchview Core
//!
//! Turns a directory of benchmark result tables into a static HTML report.
//!
//! ## Architecture
//!
//! ```text
//! ReportAssembler (one run)
//!   ├─> discovery (collections, patterns)
//!   ├─> ResultBuilder (per table)
//!   │     ├─> Table::load
//!   │     ├─> group_charts ──> ChartRegistry ──> Figure
//!   │     └─> naming (identifier, figure and page names)
//!   └─> page rendering + static assets
//! ```
//!
//! All paths flow from an explicit [`RunContext`]; chart kinds are looked up
//! in an explicit [`ChartRegistry`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use benchview_core::{ChartRegistry, ReportAssembler, ReportConfig, RunContext};
//! use std::path::Path;
//!
//! let config = ReportConfig::default();
//! let assembler = ReportAssembler::new(
//!     RunContext::from_root(Path::new(".")),
//!     ChartRegistry::with_builtin(),
//!     config.kinds.clone(),
//!     config.title.clone(),
//! );
//! let summary = assembler.run(&[], &[])?;
//! # Ok::<(), benchview_core::ReportError>(())
//! ```

pub mod assets;
pub mod chart;
pub mod config;
pub mod context;
mod error;
pub mod grouping;
pub mod naming;
pub mod page;
pub mod report;
pub mod result;
pub mod table;
pub mod template;

pub use chart::{ArtifactMode, ChartError, ChartGenerator, ChartRegistry, Figure};
pub use config::{ConfigError, ReportConfig, CONFIG_FILE};
pub use context::RunContext;
pub use error::{ReportError, ReportResult};
pub use grouping::{group_charts, Group, Grouping};
pub use report::{ReportAssembler, ReportSummary};
pub use result::{BenchmarkResult, ChartArtifact, ResultBuilder};
pub use table::{Row, Table, TableError};
