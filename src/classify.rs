//! Single-line docstring classification and reshaping.
//!
//! Every predicate answers for one line in isolation; every transform hands
//! the line back untouched when its rule does not apply. Cross-line state
//! (active dialect, current section) lives in `render::docstring`.

use regex::Regex;
use std::sync::LazyLock;

/// Bold label emitted for any recognized argument section.
pub const ARGS_LABEL: &str = "**Args:**";

/// Bold label emitted for any recognized return section.
pub const RETURNS_LABEL: &str = "**Returns:**";

// -- Regex patterns -----------------------------------------------------------

static RE_ARG_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:args|arguments|params|parameters|keyword\s+args|keyword\s+arguments)\s*:?\s*$",
    )
    .unwrap()
});

static RE_RETURN_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*returns?\s*:?\s*$").unwrap());

// `name: description`, optionally `name (type): description`
static RE_PARAM_ARG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\*{0,2}[A-Za-z_]\w*(?:\s*\([^)]*\))?\s*:\s+\S").unwrap()
});

static RE_PARAM_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\*{0,2}([A-Za-z_]\w*)(?:\s*\([^)]*\))?\s*:").unwrap()
});

static RE_SPHINX_ARG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*:(?:param|parameter|arg|argument|key|keyword)\s[^:]*:").unwrap()
});

// `:param x:` and `:param int x:` both name `x`
static RE_SPHINX_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*:(?:param|parameter|arg|argument|key|keyword)\s+(?:[^:]*\s)?\*{0,2}([A-Za-z_]\w*)\s*:",
    )
    .unwrap()
});

static RE_SPHINX_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*:returns?\s*:").unwrap());

static RE_SPHINX_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*:[^:]+:\s*").unwrap());

static RE_UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-{3,}\s*$").unwrap());

// -- Predicates ---------------------------------------------------------------

/// Empty or whitespace-only.
pub fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

/// Width of the leading whitespace. Tabs count as four columns.
pub fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Non-blank line indented deeper than `baseline`.
pub fn is_indented_arg(line: &str, baseline: usize) -> bool {
    !is_blank_line(line) && indent_width(line) > baseline
}

/// Colon-style `name: description` with a non-empty description.
pub fn is_param_arg(line: &str) -> bool {
    RE_PARAM_ARG.is_match(line)
}

/// Sphinx-style `:param name:` tag.
pub fn is_sphinx_arg(line: &str) -> bool {
    RE_SPHINX_ARG.is_match(line)
}

/// Sphinx-style `:returns:` / `:return:` tag.
pub fn is_sphinx_return(line: &str) -> bool {
    RE_SPHINX_RETURN.is_match(line)
}

/// A bare `Args` / `Arguments` / `Parameters` label, colon optional.
pub fn is_arg_header(line: &str) -> bool {
    RE_ARG_HEADER.is_match(line)
}

/// A bare `Returns` / `Return` label, colon optional.
pub fn is_return_header(line: &str) -> bool {
    RE_RETURN_HEADER.is_match(line)
}

/// NumPy-style `-----` rule placed under a section label.
pub fn is_section_underline(line: &str) -> bool {
    RE_UNDERLINE.is_match(line)
}

// -- Extraction ---------------------------------------------------------------

/// Leading identifier of an argument line in either dialect.
///
/// `"  a (int): first"` → `a`, `":param int x: input"` → `x`. Lines without
/// an identifier-shaped token give `None`.
pub fn get_arg_name(line: &str) -> Option<&str> {
    if let Some(caps) = RE_SPHINX_NAME.captures(line) {
        return caps.get(1).map(|m| m.as_str());
    }
    if RE_SPHINX_TAG.is_match(line) {
        // Some other tag (`:returns:`, `:rtype:`): not an argument.
        return None;
    }
    RE_PARAM_NAME
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Text following a Sphinx tag: `":param x: the input"` → `"the input"`.
pub fn strip_sphinx_tag(line: &str) -> &str {
    match RE_SPHINX_TAG.find(line) {
        Some(m) => line[m.end()..].trim_end(),
        None => line,
    }
}

// -- Transforms ---------------------------------------------------------------

pub fn remove_indentation(line: &str) -> &str {
    line.trim_start()
}

/// Turn an indented line into a Markdown list item.
///
/// An existing `-`, `*` or `+` marker is replaced rather than nested.
pub fn bullet_indent(line: &str) -> String {
    let text = remove_indentation(line);
    let text = ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| text.strip_prefix(marker))
        .unwrap_or(text);
    format!("- {}", text)
}

pub fn highlight_arg_header(line: &str) -> String {
    if is_arg_header(line) {
        ARGS_LABEL.to_string()
    } else {
        line.to_string()
    }
}

pub fn highlight_return_header(line: &str) -> String {
    if is_return_header(line) {
        RETURNS_LABEL.to_string()
    } else {
        line.to_string()
    }
}
