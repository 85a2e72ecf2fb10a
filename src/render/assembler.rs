//! Depth-first document assembly over `DocumentedUnit` trees.
//!
//! Output layout of one document:
//!
//! ```text
//! # Title
//!
//! Description
//!
//! ## Index            (single-document mode only)
//!
//! ## FILE: module
//!
//! Module docstring
//!
//! ---
//!
//! ### FUNCTION: module.name
//! ...
//!
//! *Automatically generated by ...*
//! ```

use super::docstring::format_docstring;
use super::{RenderConfiguration, RenderOutput, SINGLE_DOC_NAME};
use crate::error::{MalformedTreeError, Result};
use crate::model::{DocumentedUnit, UnitKind};
use crate::toc::{self, Slugger};
use crate::tracker::ArgumentTracker;
use crate::warning::DocWarning;

const HORIZONTAL_RULE: &str = "---\n";
const GENERATOR_NAME: &str = "DocString-to-Markdown";
const GENERATOR_URL: &str = "https://github.com/j-lucas-d/DocString-to-Markdown";

/// Deepest nesting accepted below a module.
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Default)]
struct RenderState {
    /// Segments of the document in progress; each ends with a newline.
    body_buffer: Vec<String>,
    index_buffer: Vec<String>,
    /// Qualified path of the unit currently being visited.
    path_stack: Vec<String>,
    /// Anchors of the document in progress.
    slugger: Slugger,
    /// File the anchors live in; empty for same-document links.
    target: String,
}

pub struct DocumentAssembler<'c> {
    config: &'c RenderConfiguration,
    state: RenderState,
    warnings: Vec<DocWarning>,
}

impl<'c> DocumentAssembler<'c> {
    pub fn new(config: &'c RenderConfiguration) -> Self {
        DocumentAssembler {
            config,
            state: RenderState::default(),
            warnings: Vec::new(),
        }
    }

    /// Traverse every root and flush the buffers according to the mode.
    pub fn run(mut self, tree: &[DocumentedUnit]) -> Result<RenderOutput> {
        let mut output = RenderOutput::default();

        if self.config.one_file_per_unit {
            for root in tree {
                let name = root.dotted_path();
                self.begin_document(format!("{}.md", name));
                self.visit(root, 0, 0)?;
                let body = self.finish_document(Vec::new());
                output.bodies.push((name, body));
            }
            output.index_entries = self.state.index_buffer.len();
            output.index = self.finish_index();
        } else {
            self.begin_document(String::new());
            self.state.slugger.slug("Index");
            for root in tree {
                self.visit(root, 0, 0)?;
            }
            output.index_entries = self.state.index_buffer.len();
            let index = std::mem::take(&mut self.state.index_buffer);
            let mut preamble = Vec::new();
            if !index.is_empty() {
                preamble.push(format!("## Index\n\n{}\n", index.join("\n")));
            }
            let body = self.finish_document(preamble);
            output.bodies.push((SINGLE_DOC_NAME.to_string(), body));
        }

        output.warnings = self.warnings;
        Ok(output)
    }

    /// Render a unit's own segment: header, optional source link, body and
    /// optional source listing. Children and separators are not included.
    pub fn render_unit(&self, unit: &DocumentedUnit, body: &str) -> String {
        let dotted = unit.dotted_path();
        let source = unit.source_path.display().to_string();
        let link_source = self.config.show_source_links && !source.is_empty();

        let mut out = match unit.kind {
            UnitKind::Module if link_source => {
                format!("## {}: [{}]({})\n", unit.kind.label(), dotted, source)
            }
            UnitKind::Module => format!("## {}: {}\n", unit.kind.label(), dotted),
            UnitKind::Class | UnitKind::Function => {
                let mut header = format!("### {}: {}\n", unit.kind.label(), dotted);
                if link_source {
                    header.push_str(&format!("\n[source]({})\n", source));
                }
                header
            }
        };

        if !body.is_empty() {
            out.push('\n');
            out.push_str(body);
            out.push('\n');
        }

        if self.config.include_source_code {
            if let Some(code) = unit.source_code.as_deref().filter(|c| !c.trim().is_empty()) {
                out.push_str(&format!(
                    "\n```{}\n{}\n```\n",
                    fence_language(unit),
                    code.trim_end()
                ));
            }
        }

        out
    }

    /// `index_depth` is the nesting of the unit's index entry: the number of
    /// ancestors that have an entry of their own.
    fn visit(&mut self, unit: &DocumentedUnit, depth: usize, index_depth: usize) -> Result<()> {
        self.check_structure(unit, depth)?;

        let dotted = unit.dotted_path();
        let heading = format!("{}: {}", unit.kind.label(), dotted);

        let mut tracker = ArgumentTracker::new();
        let formatted = format_docstring(&unit.raw_docstring, &mut tracker);
        tracing::debug!(unit = %dotted, dialect = ?formatted.dialect, "rendered docstring");

        let segment = self.render_unit(unit, &formatted.text);
        self.state.body_buffer.push(segment);
        self.state.body_buffer.push(HORIZONTAL_RULE.to_string());

        let slug = self.state.slugger.slug(&heading);
        let has_entry = !formatted.text.is_empty();
        if has_entry {
            let summary = match unit.kind {
                UnitKind::Module => formatted.text.lines().next(),
                _ => None,
            };
            let entry =
                toc::render_index_item(index_depth, &dotted, &self.state.target, &slug, summary);
            self.state.index_buffer.push(entry);
        }

        self.check_documentation(unit, &dotted, &tracker, !has_entry);

        let saved = self.state.path_stack.len();
        if depth == 0 {
            self.state.path_stack = unit.qualified_path.clone();
        } else {
            self.state.path_stack.push(unit.name().to_string());
        }
        let child_index_depth = index_depth + usize::from(has_entry);
        for child in &unit.children {
            self.visit(child, depth + 1, child_index_depth)?;
        }
        self.state.path_stack.truncate(if depth == 0 { 0 } else { saved });

        Ok(())
    }

    fn check_structure(&self, unit: &DocumentedUnit, depth: usize) -> Result<()> {
        if unit.qualified_path.is_empty() {
            return Err(MalformedTreeError::EmptyPath);
        }
        let path = unit.dotted_path();
        if unit.qualified_path.iter().any(|c| c.trim().is_empty()) {
            return Err(MalformedTreeError::EmptyComponent { path });
        }
        if depth > MAX_DEPTH {
            return Err(MalformedTreeError::TooDeep { path, limit: MAX_DEPTH });
        }

        if depth == 0 {
            if unit.kind != UnitKind::Module {
                return Err(MalformedTreeError::RootNotModule { path });
            }
            return Ok(());
        }

        if unit.kind == UnitKind::Module {
            return Err(MalformedTreeError::NestedModule { path });
        }
        let (parent, _) = unit.qualified_path.split_at(unit.qualified_path.len() - 1);
        if parent != self.state.path_stack.as_slice() {
            return Err(MalformedTreeError::PathMismatch {
                path,
                parent: self.state.path_stack.join("."),
            });
        }
        Ok(())
    }

    fn check_documentation(
        &mut self,
        unit: &DocumentedUnit,
        dotted: &str,
        tracker: &ArgumentTracker,
        empty: bool,
    ) {
        if empty {
            self.warnings.push(DocWarning::MissingDocstring {
                unit: dotted.to_string(),
            });
            return;
        }
        if unit.kind != UnitKind::Function {
            return;
        }

        for name in &unit.parameters {
            if !tracker.has_arg(name) {
                self.warnings.push(DocWarning::UndocumentedArgument {
                    unit: dotted.to_string(),
                    name: name.clone(),
                });
            }
        }

        let returns_value = unit
            .returns
            .as_deref()
            .is_some_and(|r| !r.trim().is_empty() && r.trim() != "None");
        if returns_value && !tracker.has_ret() {
            self.warnings.push(DocWarning::UndocumentedReturn {
                unit: dotted.to_string(),
            });
        }
    }

    fn begin_document(&mut self, target: String) {
        self.state.slugger = Slugger::new();
        self.state.slugger.slug(&self.config.title);
        self.state.target = target;
    }

    /// Title, `preamble`, the buffered units and the footer, joined with
    /// blank lines. Empties the body buffer.
    fn finish_document(&mut self, preamble: Vec<String>) -> String {
        let mut segments = vec![self.title_block()];
        segments.extend(preamble);
        segments.append(&mut self.state.body_buffer);
        segments.push(self.footer());
        segments.join("\n")
    }

    fn finish_index(&mut self) -> String {
        let mut segments = vec![self.title_block()];
        let index = std::mem::take(&mut self.state.index_buffer);
        if !index.is_empty() {
            segments.push(format!("{}\n", index.join("\n")));
        }
        segments.push(self.footer());
        segments.join("\n")
    }

    fn title_block(&self) -> String {
        format!("# {}\n\n{}\n", self.config.title, self.config.description)
    }

    fn footer(&self) -> String {
        format!(
            "*Automatically generated by [{}]({}) {}*\n",
            GENERATOR_NAME,
            GENERATOR_URL,
            self.config.generated_on.format("%d %B %Y")
        )
    }
}

fn fence_language(unit: &DocumentedUnit) -> &'static str {
    match unit.source_path.extension().and_then(|e| e.to_str()) {
        Some("py") => "python",
        Some("rs") => "rust",
        Some("sh" | "bash") => "bash",
        _ => "",
    }
}
