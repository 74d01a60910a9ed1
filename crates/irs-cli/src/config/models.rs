use irsscreen::engine::config::ScreeningConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    /// Built-in RNA nearest-neighbor duplex ensemble model.
    NearestNeighbor,
    /// External ViennaRNA `RNAcofold` executable.
    Rnacofold,
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest-neighbor" => Ok(EngineKind::NearestNeighbor),
            "rnacofold" => Ok(EngineKind::Rnacofold),
            other => Err(format!(
                "unknown engine '{}'; expected 'nearest-neighbor' or 'rnacofold'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineSelection {
    NearestNeighbor,
    Cofold { executable: PathBuf },
}

/// Candidate-pool settings; all that the `generate` command needs.
#[derive(Debug, Clone)]
pub struct DesignConfig {
    pub seed: Option<u64>,
    pub core_config: ScreeningConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub target: String,
    pub output_path: Option<PathBuf>,
    pub top_n: Option<usize>,
    pub engine: EngineSelection,
    pub design: DesignConfig,
}
