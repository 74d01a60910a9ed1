use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Gas constant in kcal/(mol·K).
pub const GAS_CONSTANT: f64 = 1.987_204e-3;

const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unsupported material '{0}'; only 'rna' is available")]
    UnsupportedMaterial(String),
    #[error("Invalid temperature {0} °C")]
    InvalidTemperature(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Rna,
}

impl FromStr for Material {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rna" => Ok(Material::Rna),
            other => Err(ModelError::UnsupportedMaterial(other.to_string())),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Material::Rna => write!(f, "rna"),
        }
    }
}

/// Physical conditions handed to a [`super::oracle::BindingOracle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoModel {
    material: Material,
    temperature_celsius: f64,
}

impl ThermoModel {
    pub fn new(material: Material, temperature_celsius: f64) -> Result<Self, ModelError> {
        if !temperature_celsius.is_finite() || temperature_celsius <= ABSOLUTE_ZERO_CELSIUS {
            return Err(ModelError::InvalidTemperature(temperature_celsius));
        }
        Ok(Self {
            material,
            temperature_celsius,
        })
    }

    pub fn rna(temperature_celsius: f64) -> Result<Self, ModelError> {
        Self::new(Material::Rna, temperature_celsius)
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn temperature_celsius(&self) -> f64 {
        self.temperature_celsius
    }

    pub fn temperature_kelvin(&self) -> f64 {
        self.temperature_celsius - ABSOLUTE_ZERO_CELSIUS
    }

    /// RT in kcal/mol.
    pub fn rt(&self) -> f64 {
        GAS_CONSTANT * self.temperature_kelvin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_conversion_and_rt() {
        let model = ThermoModel::rna(37.0).unwrap();
        assert!((model.temperature_kelvin() - 310.15).abs() < 1e-9);
        assert!((model.rt() - 0.616_33).abs() < 1e-4);
    }

    #[test]
    fn rejects_non_physical_temperatures() {
        assert!(ThermoModel::rna(-300.0).is_err());
        assert!(ThermoModel::rna(f64::NAN).is_err());
    }

    #[test]
    fn material_parses_case_insensitively_and_rejects_dna() {
        assert_eq!("RNA".parse::<Material>().unwrap(), Material::Rna);
        assert!(matches!(
            "dna".parse::<Material>(),
            Err(ModelError::UnsupportedMaterial(_))
        ));
    }
}
