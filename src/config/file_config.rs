use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML configuration. Every key overrides its CLI counterpart.
///
/// ```toml
/// on_malformed = "drop"
/// top_n = 5
/// format = "csv"
/// db_path = "spotify.db"
/// ```
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub on_malformed: Option<String>,
    pub top_n: Option<u32>,
    pub format: Option<String>,
    pub db_path: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
