//! Docstring body reformatting as a line-by-line state machine.
//!
//! Each line is classified by `crate::classify`; this module threads the
//! cross-line state: the locked dialect, the open section and its baseline
//! indentation, and which bold label was emitted last.

use crate::classify::{self, ARGS_LABEL, RETURNS_LABEL};
use crate::tracker::ArgumentTracker;

/// Argument-block convention locked for the rest of a docstring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    None,
    /// `Args:` headers, `name: description` lines, indentation blocks
    Colon,
    /// `:param name:` / `:returns:` tags
    Sphinx,
}

impl Dialect {
    fn allows(self, wanted: Dialect) -> bool {
        self == Dialect::None || self == wanted
    }
}

/// Result of reformatting one docstring.
#[derive(Debug)]
pub struct FormattedDocstring {
    pub text: String,
    pub dialect: Dialect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Args,
    Returns,
}

#[derive(Debug, Clone, Copy)]
struct Section {
    kind: SectionKind,
    /// Indentation of the label line; items must sit deeper.
    baseline: usize,
    /// Indentation of the first item; deeper lines continue it.
    item_indent: Option<usize>,
}

struct ScanState<'t> {
    tracker: &'t mut ArgumentTracker,
    lines: Vec<String>,
    dialect: Dialect,
    section: Option<Section>,
    /// Indentation of the docstring body, ignoring its first line.
    baseline: usize,
    /// Label most recently synthesised for Sphinx tags.
    sphinx_label: Option<SectionKind>,
    after_header: bool,
}

/// Reformat a raw docstring as Markdown, recording arguments and returns
/// into `tracker`.
pub fn format_docstring(raw: &str, tracker: &mut ArgumentTracker) -> FormattedDocstring {
    let raw_lines: Vec<&str> = raw.lines().collect();
    let mut s = ScanState {
        tracker,
        lines: Vec::new(),
        dialect: Dialect::None,
        section: None,
        baseline: body_baseline(&raw_lines),
        sphinx_label: None,
        after_header: false,
    };

    for line in &raw_lines {
        process_line(&mut s, line);
    }

    let start = s.lines.iter().position(|l| !l.is_empty()).unwrap_or(s.lines.len());
    let end = s.lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);

    FormattedDocstring {
        text: s.lines[start..end].join("\n"),
        dialect: s.dialect,
    }
}

/// Minimum indentation of the non-blank lines after the first.
///
/// The first line of a docstring usually starts right after the opening
/// quotes, so it carries no indentation of its own.
fn body_baseline(lines: &[&str]) -> usize {
    lines
        .iter()
        .skip(1)
        .filter(|l| !classify::is_blank_line(l))
        .map(|l| classify::indent_width(l))
        .min()
        .unwrap_or(0)
}

fn process_line(s: &mut ScanState, line: &str) {
    // 1. Blank always wins and closes any open section
    if classify::is_blank_line(line) {
        s.section = None;
        s.after_header = false;
        s.lines.push(String::new());
        return;
    }

    // 2. NumPy underline directly beneath a label
    if s.after_header && classify::is_section_underline(line) {
        s.after_header = false;
        return;
    }
    s.after_header = false;

    let indent = classify::indent_width(line);
    if matches!(s.section, Some(sec) if indent <= sec.baseline) {
        s.section = None;
    }

    // 3. Section labels
    if classify::is_arg_header(line) {
        if s.dialect.allows(Dialect::Colon) {
            s.dialect = Dialect::Colon;
            open_section(s, SectionKind::Args, indent, classify::highlight_arg_header(line));
        } else {
            flatten(s, line);
        }
        return;
    }

    if classify::is_return_header(line) {
        if s.dialect.allows(Dialect::Colon) {
            s.tracker.add_ret();
            open_section(s, SectionKind::Returns, indent, classify::highlight_return_header(line));
        } else {
            flatten(s, line);
        }
        return;
    }

    // 4. Sphinx tags
    if classify::is_sphinx_arg(line) {
        if s.dialect.allows(Dialect::Sphinx) {
            s.dialect = Dialect::Sphinx;
            sphinx_arg(s, line);
        } else {
            flatten(s, line);
        }
        return;
    }

    if classify::is_sphinx_return(line) {
        if s.dialect.allows(Dialect::Sphinx) {
            sphinx_return(s, line);
        } else {
            flatten(s, line);
        }
        return;
    }

    // A `name: description` line locks the colon dialect even when it
    // stays prose
    if s.dialect == Dialect::None && classify::is_param_arg(line) {
        s.dialect = Dialect::Colon;
    }

    // 5. Items of an open section
    if let Some(mut sec) = s.section {
        match sec.item_indent {
            Some(item) if indent > item => flatten(s, line),
            _ => {
                sec.item_indent = Some(indent);
                s.section = Some(sec);
                section_item(s, sec.kind, line);
            }
        }
        return;
    }

    // 6. Header-less indentation block of `name: description` lines
    if s.dialect.allows(Dialect::Colon)
        && classify::is_indented_arg(line, s.baseline)
        && classify::is_param_arg(line)
    {
        s.section = Some(Section {
            kind: SectionKind::Args,
            baseline: s.baseline,
            item_indent: Some(indent),
        });
        section_item(s, SectionKind::Args, line);
        return;
    }

    // 7. Everything else
    flatten(s, line);
}

fn open_section(s: &mut ScanState, kind: SectionKind, indent: usize, label: String) {
    separate(s);
    s.lines.push(label);
    s.section = Some(Section {
        kind,
        baseline: indent,
        item_indent: None,
    });
    s.sphinx_label = None;
    s.after_header = true;
}

fn section_item(s: &mut ScanState, kind: SectionKind, line: &str) {
    if kind == SectionKind::Args {
        if let Some(name) = classify::get_arg_name(line) {
            if s.tracker.has_arg(name) {
                flatten(s, line);
                return;
            }
            s.tracker.add_arg(name);
        }
    }
    s.lines.push(classify::bullet_indent(line));
}

fn sphinx_arg(s: &mut ScanState, line: &str) {
    let name = match classify::get_arg_name(line) {
        Some(name) if !s.tracker.has_arg(name) => name,
        _ => {
            flatten(s, line);
            return;
        }
    };
    s.tracker.add_arg(name);
    sphinx_label(s, SectionKind::Args);

    let desc = classify::strip_sphinx_tag(line);
    if desc.is_empty() {
        s.lines.push(format!("- {}", name));
    } else {
        s.lines.push(format!("- {}: {}", name, desc));
    }
}

fn sphinx_return(s: &mut ScanState, line: &str) {
    s.tracker.add_ret();
    sphinx_label(s, SectionKind::Returns);

    let desc = classify::strip_sphinx_tag(line);
    if !desc.is_empty() {
        s.lines.push(format!("- {}", desc));
    }
}

/// Emit the bold label for a Sphinx field unless it is already current.
fn sphinx_label(s: &mut ScanState, kind: SectionKind) {
    if s.sphinx_label == Some(kind) {
        return;
    }
    separate(s);
    s.lines.push(match kind {
        SectionKind::Args => ARGS_LABEL.to_string(),
        SectionKind::Returns => RETURNS_LABEL.to_string(),
    });
    s.sphinx_label = Some(kind);
}

fn flatten(s: &mut ScanState, line: &str) {
    s.sphinx_label = None;
    s.lines.push(classify::remove_indentation(line).to_string());
}

/// Keep a label from gluing onto the preceding paragraph.
fn separate(s: &mut ScanState) {
    if s.lines.last().is_some_and(|l| !l.is_empty()) {
        s.lines.push(String::new());
    }
}
