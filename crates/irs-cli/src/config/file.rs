use super::models::EngineKind;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileModelConfig {
    pub material: Option<String>,
    #[serde(rename = "temperature-celsius")]
    pub temperature_celsius: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileDesignConfig {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub reference: Option<String>,
    #[serde(rename = "middle-length")]
    pub middle_length: Option<usize>,
    #[serde(rename = "reporter-switch")]
    pub reporter_switch: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileOracleConfig {
    pub engine: Option<EngineKind>,
    #[serde(rename = "rnacofold-bin")]
    pub rnacofold_bin: Option<PathBuf>,
    #[serde(rename = "call-timeout-secs")]
    pub call_timeout_secs: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileScreeningConfig {
    pub seed: Option<u64>,
    #[serde(rename = "top-n")]
    pub top_n: Option<usize>,
    pub output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub target: Option<String>,
    pub model: Option<FileModelConfig>,
    pub design: Option<FileDesignConfig>,
    pub oracle: Option<FileOracleConfig>,
    pub screening: Option<FileScreeningConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
