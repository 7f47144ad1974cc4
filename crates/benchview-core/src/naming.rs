//! Identifiers and output file names derived from input table paths
//!
//! An identifier is the table's path relative to the input root with every
//! separator replaced by `_`, so `smooth/run1.csv` becomes
//! `smooth_run1.csv`. Figure and page names are pure functions of it, which
//! keeps cross-links stable between pages and between runs.

use std::path::{Component, Path};

use crate::chart::Figure;

/// Character replacing path separators in identifiers
pub const SEPARATOR: char = '_';

const PAGE_EXTENSION: &str = "html";

/// File name of the report index; no collection or result page may take it
pub const INDEX_PAGE: &str = "index.html";

/// Canonical identifier of a table located under `input_root`
pub fn identifier_for(input_path: &Path, input_root: &Path) -> String {
    let relative = input_path.strip_prefix(input_root).unwrap_or(input_path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    parts.join(&SEPARATOR.to_string())
}

/// Identifier without its table extension
pub fn stem(identifier: &str) -> &str {
    match identifier.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => identifier,
    }
}

/// File name of the `sequence`-th figure produced for a table
pub fn artifact_name(identifier: &str, sequence: usize) -> String {
    format!("{}{SEPARATOR}{sequence}.{}", stem(identifier), Figure::EXTENSION)
}

/// File name of a table's result page
pub fn page_name(identifier: &str) -> String {
    format!("{}.{PAGE_EXTENSION}", stem(identifier))
}

/// File name of a collection page
pub fn collection_page_name(collection: &str) -> String {
    format!("{collection}.{PAGE_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    #[test]
    fn strips_root_and_joins_components() {
        let root = Path::new("/data/outputs");
        assert_eq!(
            identifier_for(Path::new("/data/outputs/smooth/run1.csv"), root),
            "smooth_run1.csv"
        );
        assert_eq!(
            identifier_for(Path::new("/data/outputs/smooth/nested/run1.csv"), root),
            "smooth_nested_run1.csv"
        );
    }

    #[test]
    fn path_outside_root_keeps_all_components() {
        assert_eq!(
            identifier_for(Path::new("/elsewhere/lasso/r.csv"), Path::new("/data")),
            "elsewhere_lasso_r.csv"
        );
    }

    #[test]
    fn same_base_name_in_different_directories_differs() {
        let root = Path::new("root");
        let a = identifier_for(Path::new("root/a/b.csv"), root);
        let c = identifier_for(Path::new("root/c/b.csv"), root);
        assert_ne!(a, c);
    }

    #[test]
    fn page_and_artifact_names() {
        assert_eq!(page_name("smooth_run1.csv"), "smooth_run1.html");
        assert_eq!(artifact_name("smooth_run1.csv", 0), "smooth_run1_0.svg");
        assert_eq!(artifact_name("smooth_run1.csv", 12), "smooth_run1_12.svg");
        assert_eq!(page_name("noext"), "noext.html");
        assert_eq!(collection_page_name("smooth"), "smooth.html");
    }

    #[test]
    fn dotted_stems_keep_inner_dots() {
        assert_eq!(page_name("lasso_v1.2.csv"), "lasso_v1.2.html");
        assert_eq!(stem(".hidden"), ".hidden");
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z0-9]{1,6}"
    }

    proptest! {
        #[test]
        fn identifiers_are_injective_over_relative_paths(
            paths in prop::collection::hash_set(prop::collection::vec(segment(), 1..4), 1..12)
        ) {
            let root = PathBuf::from("root");
            let ids: HashSet<String> = paths
                .iter()
                .map(|parts| {
                    let mut path = root.clone();
                    for p in parts {
                        path.push(p);
                    }
                    path.set_extension("csv");
                    identifier_for(&path, &root)
                })
                .collect();
            prop_assert_eq!(ids.len(), paths.len());
        }

        #[test]
        fn artifact_names_never_repeat(id in "[a-z_]{1,10}\\.csv", n in 1usize..64) {
            let names: HashSet<String> = (0..n).map(|i| artifact_name(&id, i)).collect();
            prop_assert_eq!(names.len(), n);
        }

        #[test]
        fn page_name_is_pure(id in "[a-z0-9_]{1,12}\\.csv") {
            prop_assert_eq!(page_name(&id), page_name(&id.clone()));
        }
    }
}
