//! Source file discovery.
//!
//! Inputs may be files, directories (walked recursively) or glob patterns.
//! Directory and glob results skip names starting with an excluded prefix;
//! explicitly named files are always taken.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// File extensions recognized as source files.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["py"];

/// Name prefixes skipped by default: hidden entries, dunder files, tests.
pub const DEFAULT_EXCLUDED: &[&str] = &[".", "__", "test_"];

/// A discovered source file and the module name it documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub module_name: String,
}

/// True if `name` does not start with any excluded prefix.
pub fn is_valid(name: &str, excluded: &[String]) -> bool {
    !excluded.iter().any(|prefix| name.starts_with(prefix.as_str()))
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Expand inputs into source files, sorted by path for deterministic output.
pub fn discover(inputs: &[String], excluded: &[String]) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);

        if path.is_file() {
            let name = module_name(path.file_name().map(Path::new).unwrap_or(path));
            files.push(SourceFile {
                path: path.to_path_buf(),
                module_name: name,
            });
            continue;
        }

        if path.is_dir() {
            let walker = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| {
                    e.depth() == 0 || is_valid(&e.file_name().to_string_lossy(), excluded)
                });
            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!("skipping unreadable entry under {}: {}", path.display(), e);
                        continue;
                    }
                };
                if entry.file_type().is_file() && is_supported(entry.path()) {
                    let relative = entry.path().strip_prefix(path).unwrap_or(entry.path());
                    files.push(SourceFile {
                        path: entry.path().to_path_buf(),
                        module_name: module_name(relative),
                    });
                }
            }
            continue;
        }

        let matches: Vec<PathBuf> = glob::glob(input)
            .with_context(|| format!("invalid glob pattern: {}", input))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file() && is_supported(p))
            .filter(|p| {
                p.file_name()
                    .is_some_and(|n| is_valid(&n.to_string_lossy(), excluded))
            })
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", input);
        }
        files.extend(matches.into_iter().map(|p| SourceFile {
            module_name: module_name(&p),
            path: p,
        }));
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files.dedup_by(|a, b| a.path == b.path);
    Ok(files)
}

/// Dotted module name for a relative source path.
///
/// `pkg/sub.py` → `pkg.sub`, `my-tool.py` → `my_tool`
pub fn module_name(relative: &Path) -> String {
    let stem = relative.with_extension("");
    stem.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().replace('-', "_")),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(".")
}
