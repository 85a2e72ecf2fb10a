//! Collectors producing `DocumentedUnit` trees for the renderer.

pub mod discover;
pub mod python;
pub mod tree;

use crate::model::DocumentedUnit;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// Parse a source file into a module tree based on its extension.
pub fn parse_file(path: &Path, module_name: &str) -> Result<DocumentedUnit> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("py") => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(python::parse(&content, path, module_name))
        }
        _ => Err(anyhow!("unsupported file type: {}", path.display())),
    }
}

/// Discover and scan every input. Files that cannot be read are reported
/// and skipped.
pub fn collect(inputs: &[String], excluded: &[String]) -> Result<Vec<DocumentedUnit>> {
    let files = discover::discover(inputs, excluded)?;
    let mut units = Vec::with_capacity(files.len());

    for file in files {
        match parse_file(&file.path, &file.module_name) {
            Ok(unit) => {
                tracing::info!("processing module {}", file.module_name);
                units.push(unit);
            }
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", file.path.display(), e);
            }
        }
    }

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn unsupported_extension() {
        let err = parse_file(Path::new("notes.txt"), "notes").unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[test]
    fn parses_python_file() {
        let mut file = NamedTempFile::with_suffix(".py").unwrap();
        file.write_all(b"\"\"\"Doc.\"\"\"\n\ndef f():\n    \"\"\"F.\"\"\"\n").unwrap();
        let unit = parse_file(file.path(), "sample").unwrap();
        assert_eq!(unit.raw_docstring, "Doc.");
        assert_eq!(unit.children[0].qualified_path, vec!["sample", "f"]);
    }

    #[test]
    fn missing_input_yields_nothing() {
        let missing = std::env::temp_dir().join("docstring-md-missing-dir").join("gone.py");
        let units = collect(&[missing.to_string_lossy().to_string()], &[]).unwrap();
        assert!(units.is_empty());
    }
}
