use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};
use thiserror::Error;

use crate::formatter::config::FormatterConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Commands an entry may go unreferenced before it is forgotten.
    #[serde(default = "default_fade_limit")]
    pub fade_limit: u32,

    /// Characters of an answer shown before the rest waits for `more`.
    #[serde(default = "default_output_budget")]
    pub output_budget: usize,

    #[serde(default)]
    pub formatter: FormatterConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fade_limit: default_fade_limit(),
            output_budget: default_output_budget(),
            formatter: FormatterConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SessionConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }
}

// デフォルト値の定義
fn default_fade_limit() -> u32 {
    11
}

fn default_output_budget() -> usize {
    240
}
