use crate::core::sequence::{RnaSequence, SequenceError};
use crate::core::thermo::model::{Material, ModelError, ThermoModel};
use std::time::Duration;
use thiserror::Error;

/// 5' flank of every inhibition strand (reverse complement of `CUGAU`).
pub const STANDARD_PREFIX: &str = "GACUA";
/// 3' flank of every inhibition strand (reverse complement of `GAAAC`).
pub const STANDARD_SUFFIX: &str = "CUUUC";
/// Non-conserved region of the reporter switch that the middle region is designed against.
pub const STANDARD_REFERENCE: &str = "GAGGCCGAAAGGCC";
pub const STANDARD_MIDDLE_LENGTH: usize = 14;
/// Longest middle region a template accepts.
pub const MAX_MIDDLE_LENGTH: usize = 256;
/// HiBiT reporter switch (113 nt).
pub const HIBIT_SWITCH: &str = "UCUCCUCUGGCGACCCUGAUGAGGCCGAAAGGCCGAAACGGUAUCGACCGUAGGUUGCCAGAACAGAGGAGAUAAAGAUGGUGAGCGGCUGGCGGCUGUUCAAGAAGAUUAGC";
pub const DEFAULT_TEMPERATURE_CELSIUS: f64 = 37.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid sequence for '{field}': {source}")]
    InvalidSequence {
        field: &'static str,
        #[source]
        source: SequenceError,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn parse_field(field: &'static str, value: &str) -> Result<RnaSequence, ConfigError> {
    value
        .parse()
        .map_err(|source| ConfigError::InvalidSequence { field, source })
}

/// Fixed flanks plus the reference the variable middle region is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignTemplate {
    pub prefix: RnaSequence,
    pub suffix: RnaSequence,
    pub reference: RnaSequence,
    pub middle_length: usize,
}

impl DesignTemplate {
    pub fn new(
        prefix: RnaSequence,
        suffix: RnaSequence,
        reference: RnaSequence,
        middle_length: usize,
    ) -> Result<Self, ConfigError> {
        if reference.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "reference",
                reason: "reference sequence must not be empty".to_string(),
            });
        }
        if middle_length > MAX_MIDDLE_LENGTH {
            return Err(ConfigError::InvalidValue {
                field: "middle_length",
                reason: format!(
                    "{} exceeds the maximum of {} nt",
                    middle_length, MAX_MIDDLE_LENGTH
                ),
            });
        }
        Ok(Self {
            prefix,
            suffix,
            reference,
            middle_length,
        })
    }

    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(
            parse_field("prefix", STANDARD_PREFIX)?,
            parse_field("suffix", STANDARD_SUFFIX)?,
            parse_field("reference", STANDARD_REFERENCE)?,
            STANDARD_MIDDLE_LENGTH,
        )
    }

    pub fn strand_length(&self) -> usize {
        self.prefix.len() + self.middle_length + self.suffix.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningConfig {
    pub model: ThermoModel,
    pub template: DesignTemplate,
    pub reporter_switch: RnaSequence,
    pub call_timeout: Option<Duration>,
}

#[derive(Default)]
pub struct ScreeningConfigBuilder {
    material: Option<Material>,
    temperature_celsius: Option<f64>,
    prefix: Option<String>,
    suffix: Option<String>,
    reference: Option<String>,
    middle_length: Option<usize>,
    reporter_switch: Option<String>,
    call_timeout: Option<Duration>,
}

impl ScreeningConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-filled with the HiBiT switch design at 37 °C.
    pub fn standard() -> Self {
        Self::new()
            .material(Material::Rna)
            .temperature_celsius(DEFAULT_TEMPERATURE_CELSIUS)
            .prefix(STANDARD_PREFIX)
            .suffix(STANDARD_SUFFIX)
            .reference(STANDARD_REFERENCE)
            .middle_length(STANDARD_MIDDLE_LENGTH)
            .reporter_switch(HIBIT_SWITCH)
    }

    pub fn material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }
    pub fn temperature_celsius(mut self, celsius: f64) -> Self {
        self.temperature_celsius = Some(celsius);
        self
    }
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
    pub fn middle_length(mut self, length: usize) -> Self {
        self.middle_length = Some(length);
        self
    }
    pub fn reporter_switch(mut self, switch: impl Into<String>) -> Self {
        self.reporter_switch = Some(switch.into());
        self
    }
    pub fn call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ScreeningConfig, ConfigError> {
        let model = ThermoModel::new(
            self.material.unwrap_or_default(),
            self.temperature_celsius
                .ok_or(ConfigError::MissingParameter("temperature_celsius"))?,
        )?;

        let template = DesignTemplate::new(
            parse_field(
                "prefix",
                &self.prefix.ok_or(ConfigError::MissingParameter("prefix"))?,
            )?,
            parse_field(
                "suffix",
                &self.suffix.ok_or(ConfigError::MissingParameter("suffix"))?,
            )?,
            parse_field(
                "reference",
                &self
                    .reference
                    .ok_or(ConfigError::MissingParameter("reference"))?,
            )?,
            self.middle_length
                .ok_or(ConfigError::MissingParameter("middle_length"))?,
        )?;

        let reporter_switch = parse_field(
            "reporter_switch",
            &self
                .reporter_switch
                .ok_or(ConfigError::MissingParameter("reporter_switch"))?,
        )?;
        if reporter_switch.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "reporter_switch",
                reason: "reporter switch must not be empty".to_string(),
            });
        }

        if let Some(timeout) = self.call_timeout {
            if timeout.is_zero() {
                return Err(ConfigError::InvalidValue {
                    field: "call_timeout",
                    reason: "timeout must be positive".to_string(),
                });
            }
        }

        Ok(ScreeningConfig {
            model,
            template,
            reporter_switch,
            call_timeout: self.call_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_builder_produces_hibit_design() {
        let config = ScreeningConfigBuilder::standard().build().unwrap();
        assert_eq!(config.template.prefix.to_string(), "GACUA");
        assert_eq!(config.template.suffix.to_string(), "CUUUC");
        assert_eq!(config.template.strand_length(), 24);
        assert_eq!(config.reporter_switch.len(), 113);
        assert_eq!(config.model.temperature_celsius(), 37.0);
        assert!(config.call_timeout.is_none());
    }

    #[test]
    fn standard_template_matches_builder() {
        let config = ScreeningConfigBuilder::standard().build().unwrap();
        assert_eq!(DesignTemplate::standard().unwrap(), config.template);
    }

    #[test]
    fn missing_parameter_is_reported() {
        let result = ScreeningConfigBuilder::new()
            .temperature_celsius(37.0)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("prefix")));
    }

    #[test]
    fn invalid_sequence_names_the_field() {
        let result = ScreeningConfigBuilder::standard()
            .reporter_switch("ACGTX")
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSequence {
                field: "reporter_switch",
                ..
            })
        ));
    }

    #[test]
    fn zero_timeout_and_empty_reference_are_rejected() {
        let zero = ScreeningConfigBuilder::standard()
            .call_timeout(Some(Duration::ZERO))
            .build();
        assert!(matches!(zero, Err(ConfigError::InvalidValue { .. })));

        let empty = ScreeningConfigBuilder::standard().reference("").build();
        assert!(matches!(
            empty,
            Err(ConfigError::InvalidValue {
                field: "reference",
                ..
            })
        ));
    }

    #[test]
    fn oversized_middle_length_is_rejected() {
        for length in [MAX_MIDDLE_LENGTH + 1, 10_000_000, usize::MAX] {
            let result = ScreeningConfigBuilder::standard().middle_length(length).build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidValue {
                    field: "middle_length",
                    ..
                })
            ));
        }

        let at_limit = ScreeningConfigBuilder::standard()
            .middle_length(MAX_MIDDLE_LENGTH)
            .build()
            .unwrap();
        assert_eq!(at_limit.template.middle_length, MAX_MIDDLE_LENGTH);
    }

    #[test]
    fn non_physical_temperature_is_a_model_error() {
        let result = ScreeningConfigBuilder::standard()
            .temperature_celsius(-500.0)
            .build();
        assert!(matches!(result, Err(ConfigError::Model(_))));
    }
}
