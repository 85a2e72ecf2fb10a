//! JSON unit trees produced by external introspection tools.

use crate::model::DocumentedUnit;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum TreeFile {
    Many(Vec<DocumentedUnit>),
    One(DocumentedUnit),
}

/// Parse a single tree or an array of trees.
pub fn parse(json: &str) -> Result<Vec<DocumentedUnit>> {
    let tree: TreeFile = serde_json::from_str(json).context("invalid unit tree")?;
    Ok(match tree {
        TreeFile::Many(units) => units,
        TreeFile::One(unit) => vec![unit],
    })
}

pub fn load(path: &Path) -> Result<Vec<DocumentedUnit>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(&content).with_context(|| format!("failed to load {}", path.display()))
}
