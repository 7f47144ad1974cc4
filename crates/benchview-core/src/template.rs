//! Token-substitution page templates
//!
//! Templates contain `{{ name }}` placeholders. Text values are HTML-escaped
//! on insertion; markup values are inserted verbatim.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Errors raised while rendering a template
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template '{template}' has no value for placeholder '{name}'")]
    MissingValue { template: &'static str, name: String },
}

pub type TemplateResult<T> = Result<T, TemplateError>;

/// Built-in page templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    Index,
    Collection,
    Result,
}

impl TemplateId {
    pub fn name(self) -> &'static str {
        match self {
            TemplateId::Index => "index.html",
            TemplateId::Collection => "benchmark.html",
            TemplateId::Result => "result.html",
        }
    }

    fn source(self) -> &'static str {
        match self {
            TemplateId::Index => include_str!("../templates/index.html"),
            TemplateId::Collection => include_str!("../templates/benchmark.html"),
            TemplateId::Result => include_str!("../templates/result.html"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Text(String),
    Markup(String),
}

/// Named values substituted into a template
#[derive(Debug, Clone, Default)]
pub struct Values {
    values: BTreeMap<String, Value>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text, escaped on insertion
    pub fn text(mut self, name: &str, value: impl ToString) -> Self {
        self.values
            .insert(name.to_string(), Value::Text(value.to_string()));
        self
    }

    /// Pre-rendered markup, inserted as-is
    pub fn markup(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values
            .insert(name.to_string(), Value::Markup(value.into()));
        self
    }
}

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder regex")
});

/// Render a built-in template
pub fn render(template: TemplateId, values: &Values) -> TemplateResult<String> {
    render_str(template.name(), template.source(), values)
}

fn render_str(template: &'static str, source: &str, values: &Values) -> TemplateResult<String> {
    let mut missing = None;
    let rendered = PLACEHOLDER_REGEX.replace_all(source, |caps: &Captures<'_>| {
        let name = &caps[1];
        match values.values.get(name) {
            Some(Value::Text(text)) => escape(text),
            Some(Value::Markup(markup)) => markup.clone(),
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(TemplateError::MissingValue { template, name }),
        None => Ok(rendered.into_owned()),
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
