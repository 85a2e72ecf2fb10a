//! Python source scanner.
//!
//! Builds a `DocumentedUnit` tree from a `.py` file without importing it:
//! - module docstring → root unit
//! - `class` / `def` / `async def` blocks, nested by indentation
//! - first-statement triple-quoted (or single-line quoted) docstrings, raw
//! - parameter names and `->` return annotations from signatures
//!
//! Names starting with `_` are skipped along with everything under them.
//! Functions defined inside functions are not documented.

use crate::classify::indent_width;
use crate::model::{DocumentedUnit, UnitKind};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)class\s+([A-Za-z_]\w*)").unwrap());

static RE_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(?:async\s+)?def\s+([A-Za-z_]\w*)").unwrap());

const DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

#[derive(Debug, PartialEq, Eq)]
enum FrameKind {
    Class,
    Function,
    /// Private or nested block: tracked for indentation only.
    Skipped,
}

struct Frame {
    kind: FrameKind,
    indent: usize,
    /// First line of the block, decorators included.
    start: usize,
    unit: Option<DocumentedUnit>,
}

/// Scan Python source into a module tree named `module_name`.
pub fn parse(input: &str, path: &Path, module_name: &str) -> DocumentedUnit {
    let lines: Vec<&str> = input.lines().collect();
    let mut module = DocumentedUnit::module(module_name, "").with_source_path(path);
    let mut stack: Vec<Frame> = Vec::new();
    let mut in_string: Option<&'static str> = None;
    let mut last_content = 0;
    let mut i = 0;

    // Module docstring: first statement of the file
    if let Some(first) = next_code_line(&lines, 0) {
        if let Some((doc, end)) = extract_docstring(&lines, first) {
            module.raw_docstring = doc;
            last_content = end;
            i = end + 1;
        }
    }

    while i < lines.len() {
        let line = lines[i];

        // Inside a multi-line string literal: nothing here opens or closes blocks
        if in_string.is_some() {
            update_string_state(line, &mut in_string);
            last_content = i;
            i += 1;
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            i += 1;
            continue;
        }

        let indent = indent_width(line);
        close_frames(&mut stack, &mut module, &lines, indent, last_content);

        let header = RE_CLASS
            .captures(line)
            .map(|caps| (UnitKind::Class, caps[2].to_string()))
            .or_else(|| {
                RE_DEF
                    .captures(line)
                    .map(|caps| (UnitKind::Function, caps[2].to_string()))
            });

        let Some((kind, name)) = header else {
            update_string_state(line, &mut in_string);
            last_content = i;
            i += 1;
            continue;
        };

        let sig_end = signature_end(&lines, i);
        let signature = lines[i..=sig_end]
            .iter()
            .map(|l| l.trim())
            .collect::<Vec<_>>()
            .join(" ");
        last_content = sig_end;

        let docstring = next_code_line(&lines, sig_end + 1)
            .filter(|&j| indent_width(lines[j]) > indent)
            .and_then(|j| extract_docstring(&lines, j));
        if let Some((_, end)) = &docstring {
            last_content = *end;
        }

        let parent_documented = stack.last().map_or(true, |f| f.kind == FrameKind::Class);

        let frame = if parent_documented && !name.starts_with('_') {
            let mut qualified_path = module.qualified_path.clone();
            qualified_path.extend(
                stack
                    .iter()
                    .filter_map(|f| f.unit.as_ref())
                    .map(|u| u.name().to_string()),
            );
            qualified_path.push(name);

            let mut unit = DocumentedUnit::new(
                kind,
                qualified_path,
                docstring.map(|(doc, _)| doc).unwrap_or_default(),
            );
            unit.source_path = path.to_path_buf();
            if kind == UnitKind::Function {
                unit.parameters = parameters(&signature);
                unit.returns = return_annotation(&signature);
            }

            Frame {
                kind: if kind == UnitKind::Class {
                    FrameKind::Class
                } else {
                    FrameKind::Function
                },
                indent,
                start: decorator_start(&lines, i),
                unit: Some(unit),
            }
        } else {
            Frame {
                kind: FrameKind::Skipped,
                indent,
                start: i,
                unit: None,
            }
        };
        stack.push(frame);

        i = last_content + 1;
    }

    close_frames(&mut stack, &mut module, &lines, 0, last_content);
    module
}

/// Pop every frame indented at or beyond `indent`, attaching finished units
/// to their parent.
fn close_frames(
    stack: &mut Vec<Frame>,
    module: &mut DocumentedUnit,
    lines: &[&str],
    indent: usize,
    last_content: usize,
) {
    while stack.last().is_some_and(|f| f.indent >= indent) {
        let Some(mut frame) = stack.pop() else {
            break;
        };
        let Some(mut unit) = frame.unit.take() else {
            continue;
        };
        unit.source_code = Some(block_source(
            lines,
            frame.start,
            last_content.max(frame.start),
            frame.indent,
        ));
        match stack.last_mut().and_then(|f| f.unit.as_mut()) {
            Some(parent) => parent.children.push(unit),
            None => module.children.push(unit),
        }
    }
}

/// Source text of lines `start..=end`, dedented by the header's indentation
/// (in columns, as counted by `indent_width`).
fn block_source(lines: &[&str], start: usize, end: usize, columns: usize) -> String {
    lines[start..=end.min(lines.len() - 1)]
        .iter()
        .map(|l| strip_columns(l, columns))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop leading whitespace up to `columns` wide, one character at a time.
fn strip_columns(line: &str, columns: usize) -> &str {
    let mut width = 0;
    for (pos, c) in line.char_indices() {
        if width >= columns || !c.is_whitespace() {
            return &line[pos..];
        }
        width += if c == '\t' { 4 } else { 1 };
    }
    ""
}

fn next_code_line(lines: &[&str], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&j| {
        let t = lines[j].trim();
        !t.is_empty() && !t.starts_with('#')
    })
}

fn decorator_start(lines: &[&str], header: usize) -> usize {
    let mut start = header;
    while start > 0 && lines[start - 1].trim_start().starts_with('@') {
        start -= 1;
    }
    start
}

/// Last line of a possibly multi-line signature (brackets balanced).
fn signature_end(lines: &[&str], start: usize) -> usize {
    let mut depth: i32 = 0;
    for (j, line) in lines.iter().enumerate().skip(start) {
        for c in line.chars() {
            match c {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                '#' => break,
                _ => {}
            }
        }
        if depth <= 0 {
            return j;
        }
    }
    lines.len() - 1
}

/// Raw docstring starting at line `start`, with the index of its last line.
fn extract_docstring(lines: &[&str], start: usize) -> Option<(String, usize)> {
    let line = lines[start].trim_start();
    let line = match line.chars().next() {
        Some('r' | 'R' | 'u' | 'U') => &line[1..],
        _ => line,
    };

    for delim in DELIMITERS {
        let Some(rest) = line.strip_prefix(delim) else {
            continue;
        };
        if let Some(end) = rest.find(delim) {
            return Some((rest[..end].to_string(), start));
        }
        let mut parts = vec![rest];
        for (j, next) in lines.iter().enumerate().skip(start + 1) {
            if let Some(end) = next.find(delim) {
                parts.push(&next[..end]);
                return Some((parts.join("\n"), j));
            }
            parts.push(next);
        }
        // Unterminated
        return None;
    }

    let quote = line.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &line[1..];
    let end = rest.find(quote)?;
    Some((rest[..end].to_string(), start))
}

/// Track whether `line` leaves us inside a triple-quoted string.
fn update_string_state(line: &str, state: &mut Option<&'static str>) {
    let mut rest = line;
    loop {
        match *state {
            Some(delim) => match rest.find(delim) {
                Some(pos) => {
                    rest = &rest[pos + delim.len()..];
                    *state = None;
                }
                None => return,
            },
            None => {
                let next = DELIMITERS
                    .iter()
                    .filter_map(|d| rest.find(d).map(|pos| (pos, *d)))
                    .min_by_key(|(pos, _)| *pos);
                match next {
                    Some((pos, delim)) => {
                        rest = &rest[pos + delim.len()..];
                        *state = Some(delim);
                    }
                    None => return,
                }
            }
        }
    }
}

/// Byte offsets of the outermost parentheses in a signature.
fn parameter_span(signature: &str) -> Option<(usize, usize)> {
    let open = signature.find('(')?;
    let mut depth = 0;
    for (pos, c) in signature[open..].char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((open, open + pos));
                }
            }
            _ => {}
        }
    }
    None
}

/// Declared parameter names, without `self`, `cls`, `*` and `/` markers.
fn parameters(signature: &str) -> Vec<String> {
    let Some((open, close)) = parameter_span(signature) else {
        return Vec::new();
    };
    split_top_level(&signature[open + 1..close])
        .into_iter()
        .filter_map(|param| {
            let param = param.trim().trim_start_matches('*');
            let name = param
                .split(|c| c == ':' || c == '=')
                .next()
                .unwrap_or("")
                .trim();
            match name {
                "" | "/" | "self" | "cls" => None,
                _ => Some(name.to_string()),
            }
        })
        .collect()
}

fn return_annotation(signature: &str) -> Option<String> {
    let (_, close) = parameter_span(signature)?;
    let rest = &signature[close + 1..];
    let arrow = rest.find("->")?;
    let annotation = &rest[arrow + 2..];
    let annotation = match annotation.rfind(':') {
        Some(colon) => &annotation[..colon],
        None => annotation,
    };
    let annotation = annotation.trim();
    (!annotation.is_empty()).then(|| annotation.to_string())
}

/// Split on commas outside brackets and quotes.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[' | '{') => depth += 1,
            (None, ')' | ']' | '}') => depth -= 1,
            (None, ',') if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
