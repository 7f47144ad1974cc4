//! Page rendering: index, collection, and result pages

use chrono::{DateTime, Utc};
use std::fmt::Write as _;

use crate::context::href;
use crate::naming::collection_page_name;
use crate::result::{BenchmarkResult, ChartArtifact};
use crate::template::{escape, render, TemplateId, TemplateResult, Values};

/// A collection as listed on the index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    pub name: String,
    pub result_count: usize,
}

/// Display form of a last-updated time
pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "never".to_string())
}

pub fn render_index(
    title: &str,
    collections: &[CollectionEntry],
    last_updated: Option<DateTime<Utc>>,
) -> TemplateResult<String> {
    let mut rows = String::new();
    for c in collections {
        let _ = writeln!(
            rows,
            "      <tr><td><a href=\"{}\">{}</a></td><td>{}</td></tr>",
            escape(&collection_page_name(&c.name)),
            escape(&c.name),
            c.result_count
        );
    }
    if collections.is_empty() {
        rows.push_str("      <tr><td class=\"empty\" colspan=\"2\">No benchmarks found</td></tr>\n");
    }

    let total: usize = collections.iter().map(|c| c.result_count).sum();
    let values = Values::new()
        .text("title", title)
        .text("total", total)
        .text("last_updated", format_timestamp(last_updated))
        .markup("collections", rows);
    render(TemplateId::Index, &values)
}

pub fn render_collection(
    title: &str,
    collection: &str,
    results: &[BenchmarkResult],
    last_updated: Option<DateTime<Utc>>,
) -> TemplateResult<String> {
    let mut rows = String::new();
    for r in results {
        let _ = writeln!(
            rows,
            "      <tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"{}\" download>csv</a></td></tr>",
            escape(&r.page_name),
            escape(&r.identifier),
            escape(&r.datasets.join(", ")),
            escape(&r.objectives.join(", ")),
            escape(&r.solvers.join(", ")),
            r.row_count,
            escape(&href(&r.table_copy)),
        );
    }
    if results.is_empty() {
        rows.push_str("      <tr><td class=\"empty\" colspan=\"6\">No results</td></tr>\n");
    }

    let values = Values::new()
        .text("title", title)
        .text("collection", collection)
        .text("count", results.len())
        .text("last_updated", format_timestamp(last_updated))
        .markup("results", rows);
    render(TemplateId::Collection, &values)
}

pub fn render_result(title: &str, result: &BenchmarkResult) -> TemplateResult<String> {
    let mut sections = String::new();
    for dataset in &result.datasets {
        for objective in &result.objectives {
            let mut charts = result.charts_for(dataset, objective).peekable();
            if charts.peek().is_none() {
                continue;
            }
            let _ = writeln!(
                sections,
                "<section class=\"group\">\n<h2>{} <small>{}</small></h2>",
                escape(dataset),
                escape(objective)
            );
            for chart in charts {
                let body = match &chart.artifact {
                    ChartArtifact::File(path) => format!(
                        "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                        escape(&href(path)),
                        escape(&chart.kind)
                    ),
                    ChartArtifact::Inline(markup) => markup.clone(),
                };
                let _ = writeln!(
                    sections,
                    "<figure class=\"chart\">{body}<figcaption>{}</figcaption></figure>",
                    escape(&chart.kind)
                );
            }
            sections.push_str("</section>\n");
        }
    }

    let values = Values::new()
        .text("title", title)
        .text("collection", &result.collection)
        .text("collection_page", collection_page_name(&result.collection))
        .text("identifier", &result.identifier)
        .text("page_name", &result.page_name)
        .text("table_href", href(&result.table_copy))
        .markup("sections", sections);
    render(TemplateId::Result, &values)
}
