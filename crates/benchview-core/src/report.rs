//! Report assembly
//!
//! Discovers the tables of every collection, builds one result per table,
//! and writes the index, collection, and result pages plus static assets.
//!
//! Discovery is sorted and all output names are derived from input paths,
//! so regenerating over unchanged inputs rewrites identical files. Files
//! left over from a previous, larger input set are not removed.

use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::assets;
use crate::chart::ChartRegistry;
use crate::context::RunContext;
use crate::error::{ReportError, ReportResult};
use crate::naming::{collection_page_name, identifier_for, page_name, INDEX_PAGE};
use crate::page::{render_collection, render_index, render_result, CollectionEntry};
use crate::result::{BenchmarkResult, ResultBuilder};
use crate::table::distinct;

/// Extension of result tables picked up by discovery
pub const TABLE_EXTENSION: &str = "csv";

/// Pattern used when the caller gives none
pub const MATCH_ALL: &str = "*";

/// What a run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub collections: Vec<CollectionEntry>,
    pub figures_written: usize,
    pub pages_written: usize,
    pub assets_written: usize,
}

impl ReportSummary {
    pub fn result_count(&self) -> usize {
        self.collections.iter().map(|c| c.result_count).sum()
    }
}

/// Drives a full report run over an explicit context
pub struct ReportAssembler {
    ctx: RunContext,
    registry: ChartRegistry,
    kinds: Vec<String>,
    title: String,
}

impl ReportAssembler {
    pub fn new(
        ctx: RunContext,
        registry: ChartRegistry,
        kinds: Vec<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            ctx,
            registry,
            kinds,
            title: title.into(),
        }
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    /// Generate the whole report
    ///
    /// `collections` defaults to every sub-directory of the input root and
    /// `patterns` to matching every table. Nothing is written if a requested
    /// chart kind is unknown.
    pub fn run(&self, collections: &[String], patterns: &[String]) -> ReportResult<ReportSummary> {
        self.registry.validate(&self.kinds)?;

        let collections = if collections.is_empty() {
            self.list_collections()?
        } else {
            distinct(collections.iter().map(String::as_str))
        };
        let patterns = if patterns.is_empty() {
            vec![MATCH_ALL.to_string()]
        } else {
            patterns.to_vec()
        };

        let mut discovered = Vec::with_capacity(collections.len());
        for name in &collections {
            let tables = self.discover_tables(name, &patterns)?;
            if tables.is_empty() {
                warn!("No result tables found for benchmark '{}'", name);
            }
            discovered.push((name.clone(), tables));
        }
        self.check_output_names(&discovered)?;

        let mut summary = ReportSummary {
            assets_written: assets::install(&self.ctx.static_dir())?,
            ..ReportSummary::default()
        };

        let entries: Vec<CollectionEntry> = discovered
            .iter()
            .map(|(name, tables)| CollectionEntry {
                name: name.clone(),
                result_count: tables.len(),
            })
            .collect();
        let all_tables = discovered.iter().flat_map(|(_, tables)| tables.iter());
        let index = render_index(&self.title, &entries, latest_modification(all_tables))?;
        self.write_page(INDEX_PAGE, &index)?;
        summary.pages_written += 1;

        let builder = ResultBuilder::new(&self.ctx, &self.registry, &self.kinds);
        for (name, tables) in &discovered {
            info!("Building benchmark '{}' ({} tables)", name, tables.len());
            let results = tables
                .iter()
                .map(|table| builder.build(name, table))
                .collect::<ReportResult<Vec<BenchmarkResult>>>()?;

            let last_updated = results.iter().filter_map(|r| r.modified).max();
            let page = render_collection(&self.title, name, &results, last_updated)?;
            self.write_page(&collection_page_name(name), &page)?;
            summary.pages_written += 1;

            for result in &results {
                let page = render_result(&self.title, result)?;
                self.write_page(&result.page_name, &page)?;
                summary.pages_written += 1;
                summary.figures_written += result.figure_count();
            }
        }

        summary.collections = entries;
        info!(
            "Report written to {} ({} results, {} pages, {} figures)",
            self.ctx.output_root().display(),
            summary.result_count(),
            summary.pages_written,
            summary.figures_written
        );
        Ok(summary)
    }

    /// Non-hidden sub-directories of the input root, sorted by name
    pub fn list_collections(&self) -> ReportResult<Vec<String>> {
        let root = self.ctx.input_root();
        if !root.is_dir() {
            warn!("Input root {} does not exist", root.display());
            return Ok(Vec::new());
        }

        let discovery_err = |source| ReportError::Discovery {
            path: root.to_path_buf(),
            source,
        };
        let mut names = Vec::new();
        for entry in std::fs::read_dir(root).map_err(discovery_err)? {
            let entry = entry.map_err(discovery_err)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with('.') && entry.path().is_dir() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Tables of one collection matching any pattern, deduplicated and sorted
    pub fn discover_tables(&self, collection: &str, patterns: &[String]) -> ReportResult<Vec<PathBuf>> {
        let dir = self.ctx.collection_dir(collection);
        let mut found = BTreeSet::new();
        // Only the user's pattern is glob syntax; the directory is matched literally
        let prefix = glob::Pattern::escape(&dir.to_string_lossy());
        for pattern in patterns {
            let full = format!("{prefix}/**/{pattern}");
            let pattern_err = |source| ReportError::Pattern {
                pattern: pattern.clone(),
                source,
            };
            let paths = glob::glob(&full).map_err(pattern_err)?;
            for path in paths {
                let path = path.map_err(|e| ReportError::Discovery {
                    path: e.path().to_path_buf(),
                    source: e.into(),
                })?;
                if is_table(&path) {
                    found.insert(path);
                }
            }
        }
        Ok(found.into_iter().collect())
    }

    /// Every table identifier and every page file name of the run must be unique
    fn check_output_names(&self, discovered: &[(String, Vec<PathBuf>)]) -> ReportResult<()> {
        let mut identifiers: HashMap<String, &Path> = HashMap::new();
        let mut pages: HashMap<String, String> = HashMap::new();
        claim_page(&mut pages, INDEX_PAGE.to_string(), "the report index".to_string())?;

        for (name, tables) in discovered {
            claim_page(
                &mut pages,
                collection_page_name(name),
                format!("benchmark '{name}'"),
            )?;
            for path in tables {
                let identifier = identifier_for(path, self.ctx.input_root());
                if let Some(first) = identifiers.insert(identifier.clone(), path) {
                    return Err(ReportError::IdentifierCollision {
                        identifier,
                        first: first.to_path_buf(),
                        second: path.clone(),
                    });
                }
                claim_page(
                    &mut pages,
                    page_name(&identifier),
                    format!("table '{}'", path.display()),
                )?;
            }
        }
        Ok(())
    }

    fn write_page(&self, name: &str, html: &str) -> ReportResult<()> {
        let root = self.ctx.output_root();
        std::fs::create_dir_all(root).map_err(|e| ReportError::output_write(root, e))?;
        let path = root.join(name);
        std::fs::write(&path, html).map_err(|e| ReportError::output_write(&path, e))
    }
}

fn claim_page(pages: &mut HashMap<String, String>, page: String, owner: String) -> ReportResult<()> {
    if let Some(first) = pages.get(&page) {
        return Err(ReportError::PageCollision {
            first: first.clone(),
            second: owner,
            page,
        });
    }
    pages.insert(page, owner);
    Ok(())
}

fn is_table(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TABLE_EXTENSION))
}

fn latest_modification<'a>(paths: impl Iterator<Item = &'a PathBuf>) -> Option<DateTime<Utc>> {
    paths
        .filter_map(|p| std::fs::metadata(p).and_then(|m| m.modified()).ok())
        .max()
        .map(DateTime::<Utc>::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartResult, Figure};
    use crate::grouping::Group;
    use tempfile::TempDir;

    fn fake(group: &Group<'_>) -> ChartResult<Figure> {
        Ok(Figure::from_svg(format!("<svg>{}</svg>", group.dataset)))
    }

    fn assembler(root: &Path) -> ReportAssembler {
        let mut registry = ChartRegistry::new();
        registry.register("curve", fake);
        ReportAssembler::new(
            RunContext::from_root(root),
            registry,
            vec!["curve".to_string()],
            "Bench",
        )
    }

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn lists_visible_directories_sorted() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("outputs");
        for dir in ["lasso", "logreg", ".git"] {
            std::fs::create_dir_all(input.join(dir)).unwrap();
        }
        write(&input.join("notes.txt"), "");

        let names = assembler(temp.path()).list_collections().unwrap();
        assert_eq!(names, vec!["lasso", "logreg"]);
    }

    #[test]
    fn missing_input_root_has_no_collections() {
        let temp = TempDir::new().unwrap();
        assert!(assembler(temp.path()).list_collections().unwrap().is_empty());
    }

    #[test]
    fn discovery_dedups_sorts_and_filters_tables() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("outputs/lasso");
        write(&dir.join("b.csv"), "");
        write(&dir.join("a.csv"), "");
        write(&dir.join("sub/c.csv"), "");
        write(&dir.join("readme.md"), "");

        let asm = assembler(temp.path());
        let all = asm
            .discover_tables("lasso", &["*".to_string(), "a*".to_string()])
            .unwrap();
        assert_eq!(
            all,
            vec![dir.join("a.csv"), dir.join("b.csv"), dir.join("sub/c.csv")]
        );

        let only_b = asm.discover_tables("lasso", &["b*".to_string()]).unwrap();
        assert_eq!(only_b, vec![dir.join("b.csv")]);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let temp = TempDir::new().unwrap();
        let err = assembler(temp.path())
            .discover_tables("lasso", &["[".to_string()])
            .unwrap_err();
        assert!(matches!(err, ReportError::Pattern { .. }));
    }

    #[test]
    fn colliding_identifiers_abort_before_writing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("outputs/lasso");
        let table = "data_name,objective_name\nA,o\n";
        write(&dir.join("b_c.csv"), table);
        write(&dir.join("b/c.csv"), table);

        let asm = assembler(temp.path());
        let err = asm.run(&[], &[]).unwrap_err();

        assert!(matches!(err, ReportError::IdentifierCollision { ref identifier, .. }
            if identifier == "lasso_b_c.csv"));
        assert!(!asm.context().output_root().exists());
    }

    #[test]
    fn collection_page_clashing_with_result_page_is_rejected() {
        let temp = TempDir::new().unwrap();
        let table = "data_name,objective_name\nA,o\n";
        write(&temp.path().join("outputs/lasso/ridge.csv"), table);
        write(&temp.path().join("outputs/lasso_ridge/x.csv"), table);

        let asm = assembler(temp.path());
        let err = asm.run(&[], &[]).unwrap_err();

        match &err {
            ReportError::PageCollision { page, first, second } => {
                assert_eq!(page, "lasso_ridge.html");
                assert!(first.contains("ridge.csv"));
                assert!(second.contains("benchmark 'lasso_ridge'"));
            }
            other => panic!("Expected PageCollision, got: {other}"),
        }
        assert!(!asm.context().output_root().exists());
    }

    #[test]
    fn collection_named_index_is_rejected() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join("outputs/index/r.csv"),
            "data_name,objective_name\nA,o\n",
        );

        let asm = assembler(temp.path());
        let err = asm.run(&[], &[]).unwrap_err();

        assert!(matches!(err, ReportError::PageCollision { ref page, .. } if page == "index.html"));
        assert!(!asm.context().output_root().exists());
    }

    #[test]
    fn repeated_collection_names_are_built_once() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join("outputs/lasso/r.csv"),
            "data_name,objective_name\nA,o\n",
        );

        let summary = assembler(temp.path())
            .run(&["lasso".to_string(), "lasso".to_string()], &[])
            .unwrap();

        assert_eq!(summary.collections.len(), 1);
        assert_eq!(summary.result_count(), 1);
    }

    #[test]
    fn glob_characters_in_collection_names_match_literally() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("outputs/lasso[v2]");
        write(&dir.join("r.csv"), "data_name,objective_name\nA,o\n");

        let asm = assembler(temp.path());
        let tables = asm.discover_tables("lasso[v2]", &["*".to_string()]).unwrap();
        assert_eq!(tables, vec![dir.join("r.csv")]);

        let summary = asm.run(&[], &[]).unwrap();
        assert_eq!(summary.collections[0].name, "lasso[v2]");
        assert_eq!(summary.collections[0].result_count, 1);
        assert!(temp.path().join("html/lasso[v2]_r.html").is_file());
    }

    #[test]
    fn unknown_kind_writes_no_output() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join("outputs/lasso/r.csv"),
            "data_name,objective_name\nA,o\n",
        );
        let asm = ReportAssembler::new(
            RunContext::from_root(temp.path()),
            ChartRegistry::new(),
            vec!["curve".to_string()],
            "Bench",
        );

        let err = asm.run(&[], &[]).unwrap_err();
        assert!(matches!(err, ReportError::UnknownChartKind { .. }));
        assert!(!asm.context().output_root().exists());
    }
}
