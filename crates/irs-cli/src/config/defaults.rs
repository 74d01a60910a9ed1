use super::models::EngineKind;
use irsscreen::core::thermo::cofold::DEFAULT_COFOLD_BIN;
use irsscreen::engine::config as core_config;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub material: String,
    pub temperature_celsius: f64,
    pub prefix: String,
    pub suffix: String,
    pub reference: String,
    pub middle_length: usize,
    pub reporter_switch: String,
    pub engine: EngineKind,
    pub rnacofold_bin: PathBuf,
    pub output: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            material: "rna".to_string(),
            temperature_celsius: core_config::DEFAULT_TEMPERATURE_CELSIUS,
            prefix: core_config::STANDARD_PREFIX.to_string(),
            suffix: core_config::STANDARD_SUFFIX.to_string(),
            reference: core_config::STANDARD_REFERENCE.to_string(),
            middle_length: core_config::STANDARD_MIDDLE_LENGTH,
            reporter_switch: core_config::HIBIT_SWITCH.to_string(),
            engine: EngineKind::NearestNeighbor,
            rnacofold_bin: PathBuf::from(DEFAULT_COFOLD_BIN),
            output: PathBuf::from("irs_screening_results.csv"),
        }
    }
}
