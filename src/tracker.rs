//! Per-docstring record of documented arguments and return sections.

use std::collections::BTreeSet;

/// Scoped to exactly one docstring; create a fresh one per unit.
#[derive(Debug, Default)]
pub struct ArgumentTracker {
    seen_arg_names: BTreeSet<String>,
    return_seen: bool,
}

impl ArgumentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an argument name. Repeats are no-ops.
    pub fn add_arg(&mut self, name: &str) {
        if !self.seen_arg_names.contains(name) {
            self.seen_arg_names.insert(name.to_string());
        }
    }

    pub fn add_ret(&mut self) {
        self.return_seen = true;
    }

    pub fn has_arg(&self, name: &str) -> bool {
        self.seen_arg_names.contains(name)
    }

    pub fn has_ret(&self) -> bool {
        self.return_seen
    }

    /// Recorded names in sorted order.
    pub fn arg_names(&self) -> impl Iterator<Item = &str> {
        self.seen_arg_names.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.seen_arg_names.is_empty()
    }
}
