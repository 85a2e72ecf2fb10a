//! Markdown rendering: configuration, output and the `render` entry point.

pub mod assembler;
pub mod docstring;

use crate::error::Result;
use crate::model::DocumentedUnit;
use crate::warning::DocWarning;
use chrono::NaiveDate;

pub use assembler::DocumentAssembler;

/// Body name used for the combined document in single-document mode.
pub const SINGLE_DOC_NAME: &str = "API";

/// Options controlling the shape of the rendered output.
///
/// `title` and `description` are expected to be non-empty; callers check
/// that before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfiguration {
    pub title: String,
    pub description: String,
    /// One document per top-level module plus an index document
    pub one_file_per_unit: bool,
    /// Link headers back to the unit's source file
    pub show_source_links: bool,
    /// Append each unit's source text as a fenced code block
    pub include_source_code: bool,
    /// Date printed in the footer
    pub generated_on: NaiveDate,
}

impl RenderConfiguration {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        generated_on: NaiveDate,
    ) -> Self {
        RenderConfiguration {
            title: title.into(),
            description: description.into(),
            one_file_per_unit: false,
            show_source_links: false,
            include_source_code: false,
            generated_on,
        }
    }
}

/// Finished documents, ready to be persisted.
#[derive(Debug, Default)]
pub struct RenderOutput {
    /// `(name, text)` pairs in discovery order. `name` carries no extension.
    pub bodies: Vec<(String, String)>,
    /// Index document; empty in single-document mode, where the index is
    /// embedded in the combined body.
    pub index: String,
    /// Number of index entries written
    pub index_entries: usize,
    pub warnings: Vec<DocWarning>,
}

/// Render a forest of module trees.
///
/// Deterministic for identical inputs. A structurally malformed tree fails
/// the whole call and yields no output at all.
pub fn render(tree: &[DocumentedUnit], config: &RenderConfiguration) -> Result<RenderOutput> {
    DocumentAssembler::new(config).run(tree)
}
