//! Explicit run context shared by every stage of a report run

use std::path::{Path, PathBuf};

const INPUT_DIR: &str = "outputs";
const OUTPUT_DIR: &str = "html";
const STATIC_DIR: &str = "static";
const FIGURES_DIR: &str = "figures";
const TABLES_DIR: &str = "outputs";

/// Input and output roots of one report run
///
/// Built once by the caller and passed by reference to every component;
/// all output paths are derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    input_root: PathBuf,
    output_root: PathBuf,
}

impl RunContext {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Conventional layout under a project root: `<root>/outputs` in, `<root>/html` out
    pub fn from_root(root: &Path) -> Self {
        Self::new(root.join(INPUT_DIR), root.join(OUTPUT_DIR))
    }

    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Directory holding a collection's input tables
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.input_root.join(collection)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.output_root.join(STATIC_DIR)
    }

    /// Figure directory of a collection, relative to the output root
    pub fn figures_rel(&self, collection: &str) -> PathBuf {
        Path::new(FIGURES_DIR).join(collection)
    }

    /// Raw-table directory of a collection, relative to the output root
    pub fn tables_rel(&self, collection: &str) -> PathBuf {
        Path::new(TABLES_DIR).join(collection)
    }

    /// Absolute path of an output-relative path
    pub fn output_path(&self, relative: &Path) -> PathBuf {
        self.output_root.join(relative)
    }
}

/// Render a relative path as a URL path with `/` separators
pub fn href(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
