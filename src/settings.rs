//! User defaults persisted between runs in `.dsm.cfg` (JSON).

use crate::collect::discover::DEFAULT_EXCLUDED;
use crate::render::RenderConfiguration;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = ".dsm.cfg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where source files are read from
    pub directory: String,
    /// Where documents are written
    pub destination: String,
    pub excluded_files: Vec<String>,
    pub single_doc_mode: bool,
    pub single_doc_name: String,
    /// Append each unit's source code to its section
    pub show_source: bool,
    pub show_source_links: bool,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            directory: ".".to_string(),
            destination: ".".to_string(),
            excluded_files: DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect(),
            single_doc_mode: true,
            single_doc_name: "API.md".to_string(),
            show_source: false,
            show_source_links: false,
            title: None,
            description: None,
        }
    }
}

impl Settings {
    /// Read settings from `path`, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Settings> {
        if !path.exists() {
            tracing::debug!("no configuration file at {}", path.display());
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Settings::parse(&content)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Parse settings JSON. Unknown keys are reported and ignored.
    pub fn parse(json: &str) -> Result<Settings> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let serde_json::Value::Object(map) = &value {
            let known = serde_json::to_value(Settings::default())?;
            for key in map.keys() {
                if known.get(key).is_none() {
                    tracing::warn!("ignoring unknown configuration key: {}", key);
                }
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("saved configuration to {}", path.display());
        Ok(())
    }

    /// Check that every setting the renderer depends on is defined.
    pub fn validate(&self) -> Result<()> {
        if self.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            bail!("title must be defined (use --title or set it in {})", CONFIG_FILE);
        }
        if self.description.as_deref().map_or(true, |d| d.trim().is_empty()) {
            bail!("description must be defined (use --description or set it in {})", CONFIG_FILE);
        }
        if self.single_doc_mode && self.single_doc_name.trim().is_empty() {
            bail!("single_doc_name must not be empty");
        }
        Ok(())
    }

    pub fn render_configuration(&self, generated_on: NaiveDate) -> Result<RenderConfiguration> {
        self.validate()?;
        let mut config = RenderConfiguration::new(
            self.title.clone().unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
            generated_on,
        );
        config.one_file_per_unit = !self.single_doc_mode;
        config.show_source_links = self.show_source_links;
        config.include_source_code = self.show_source;
        Ok(config)
    }
}
