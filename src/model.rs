//! Data model for documented program units, independent of source language.
//!
//! Collectors build these trees; the renderer only reads them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What kind of program unit a [`DocumentedUnit`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Module,
    Class,
    Function,
}

impl UnitKind {
    /// Label used in rendered headers (`FILE`, `CLASS`, `FUNCTION`).
    pub fn label(self) -> &'static str {
        match self {
            UnitKind::Module => "FILE",
            UnitKind::Class => "CLASS",
            UnitKind::Function => "FUNCTION",
        }
    }
}

/// One module, class or function plus its nested children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentedUnit {
    pub kind: UnitKind,
    /// Names from the root module down to this unit.
    pub qualified_path: Vec<String>,
    /// Docstring text exactly as written, indentation included.
    #[serde(default)]
    pub raw_docstring: String,
    /// Nested units in discovery order.
    #[serde(default)]
    pub children: Vec<DocumentedUnit>,
    #[serde(default)]
    pub source_path: PathBuf,
    /// Declared parameter names (functions only, `self`/`cls` excluded)
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Declared return annotation, if any
    #[serde(default)]
    pub returns: Option<String>,
    /// Source text of the unit's definition
    #[serde(default)]
    pub source_code: Option<String>,
}

impl DocumentedUnit {
    pub fn new(
        kind: UnitKind,
        qualified_path: Vec<String>,
        raw_docstring: impl Into<String>,
    ) -> Self {
        DocumentedUnit {
            kind,
            qualified_path,
            raw_docstring: raw_docstring.into(),
            children: Vec::new(),
            source_path: PathBuf::new(),
            parameters: Vec::new(),
            returns: None,
            source_code: None,
        }
    }

    /// Build a module unit from a dotted name like `pkg.sub`.
    pub fn module(dotted: &str, raw_docstring: impl Into<String>) -> Self {
        let path = dotted.split('.').map(str::to_string).collect();
        DocumentedUnit::new(UnitKind::Module, path, raw_docstring)
    }

    /// Build a child of `self` with the given kind and trailing name.
    pub fn child(&self, kind: UnitKind, name: &str, raw_docstring: impl Into<String>) -> Self {
        let mut path = self.qualified_path.clone();
        path.push(name.to_string());
        let mut unit = DocumentedUnit::new(kind, path, raw_docstring);
        unit.source_path = self.source_path.clone();
        unit
    }

    pub fn with_children(mut self, children: Vec<DocumentedUnit>) -> Self {
        self.children = children;
        self
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Trailing component of the qualified path.
    pub fn name(&self) -> &str {
        self.qualified_path.last().map(String::as_str).unwrap_or("")
    }

    /// Qualified path joined with `.`: `["mod", "helper"]` → `mod.helper`.
    pub fn dotted_path(&self) -> String {
        self.qualified_path.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_from_dotted_name() {
        let unit = DocumentedUnit::module("pkg.sub", "");
        assert_eq!(unit.qualified_path, vec!["pkg", "sub"]);
        assert_eq!(unit.name(), "sub");
        assert_eq!(unit.dotted_path(), "pkg.sub");
    }

    #[test]
    fn child_extends_path_and_inherits_source() {
        let module = DocumentedUnit::module("mod", "").with_source_path("mod.py");
        let func = module.child(UnitKind::Function, "helper", "Help.");
        assert_eq!(func.qualified_path, vec!["mod", "helper"]);
        assert_eq!(func.source_path, PathBuf::from("mod.py"));
        assert_eq!(func.kind, UnitKind::Function);
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{"kind": "function", "qualified_path": ["m", "f"]}"#;
        let unit: DocumentedUnit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.kind, UnitKind::Function);
        assert!(unit.raw_docstring.is_empty());
        assert!(unit.children.is_empty());
        assert!(unit.returns.is_none());
    }
}
