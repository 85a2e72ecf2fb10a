//! GitHub-flavored markdown anchor/slug generation and index entries.

use std::collections::HashMap;

/// Hands out heading anchors for one rendered document.
///
/// Repeated headings get `-1`, `-2`, … suffixes the way GitHub numbers them.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, heading: &str) -> String {
        let base = github_slug(heading);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        slug
    }
}

/// GitHub heading anchor slug generation.
///
/// - lowercase
/// - drop everything that isn't alphanumeric, space, underscore or hyphen
/// - replace spaces with hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

/// One index bullet, indented two spaces per nesting level.
///
/// `target` is the document the anchor lives in; empty for same-document links.
pub fn render_index_item(
    depth: usize,
    display: &str,
    target: &str,
    slug: &str,
    summary: Option<&str>,
) -> String {
    let mut line = format!("{}- [{}]({}#{})", "  ".repeat(depth), display, target, slug);
    if let Some(summary) = summary.filter(|s| !s.is_empty()) {
        line.push_str(": ");
        line.push_str(summary);
    }
    line
}
