// MI Agent Run Configuration Module
//
// This module loads the file passed with `--config`.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// How the configuration file is interpreted, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    /// Unknown extension; contents are not read
    Opaque,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Opaque,
        }
    }
}

/// Parsed run configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Where the configuration came from
    pub path: PathBuf,

    pub format: ConfigFormat,

    /// Top-level mapping; empty for opaque or empty files
    settings: serde_json::Map<String, serde_json::Value>,
}

impl RunConfig {
    /// Load configuration from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path);

        let settings = match format {
            ConfigFormat::Opaque => {
                if !path.exists() {
                    anyhow::bail!("Config file does not exist: {:?}", path);
                }
                serde_json::Map::new()
            }
            ConfigFormat::Yaml | ConfigFormat::Json => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                parse_settings(&content, format)
                    .with_context(|| format!("Failed to parse config file: {:?}", path))?
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            format,
            settings,
        })
    }

    /// Top-level keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        self.settings.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Deserialize one top-level entry, `None` if the key is absent
    pub fn section<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.settings.get(key) {
            Some(value) => {
                let section = serde_json::from_value(value.clone())
                    .with_context(|| format!("Invalid '{}' section in {:?}", key, self.path))?;
                Ok(Some(section))
            }
            None => Ok(None),
        }
    }
}

fn parse_settings(
    content: &str,
    format: ConfigFormat,
) -> Result<serde_json::Map<String, serde_json::Value>> {
    if content.trim().is_empty() {
        return Ok(serde_json::Map::new());
    }

    let value: serde_json::Value = match format {
        ConfigFormat::Json => serde_json::from_str(content).context("Invalid JSON")?,
        _ => serde_yaml::from_str(content).context("Invalid YAML")?,
    };

    match value {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Null => Ok(serde_json::Map::new()),
        other => anyhow::bail!(
            "Config must be a mapping with key-value pairs, found: {}",
            other
        ),
    }
}
