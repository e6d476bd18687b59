mod file_config;

pub use file_config::FileConfig;

use crate::analysis::DEFAULT_TOP_N;
use crate::dataset::MalformedRowPolicy;
use crate::report_output::OutputFormat;
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub on_malformed: MalformedRowPolicy,
    pub top_n: u32,
    pub format: OutputFormat,
    pub db_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            on_malformed: MalformedRowPolicy::default(),
            top_n: DEFAULT_TOP_N,
            format: OutputFormat::default(),
            db_path: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub on_malformed: MalformedRowPolicy,
    pub top_n: u32,
    pub format: OutputFormat,
    /// Database used when a command gets neither `--csv` nor `--db`.
    pub db_path: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let on_malformed = match file.on_malformed {
            Some(s) => MalformedRowPolicy::from_str(&s, true)
                .map_err(|_| anyhow!("Invalid on_malformed value in config file: {:?}", s))?,
            None => cli.on_malformed,
        };

        let top_n = file.top_n.unwrap_or(cli.top_n);
        if top_n == 0 {
            bail!("top_n must be at least 1");
        }

        let format = match file.format {
            Some(s) => OutputFormat::from_str(&s, true)
                .map_err(|_| anyhow!("Invalid format value in config file: {:?}", s))?,
            None => cli.format,
        };

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone());

        Ok(Self {
            on_malformed,
            top_n,
            format,
            db_path,
        })
    }
}
