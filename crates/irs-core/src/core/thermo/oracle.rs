use super::model::ThermoModel;
use crate::core::sequence::RnaSequence;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Invalid oracle input: {0}")]
    InvalidInput(String),

    #[error("Thermodynamics engine '{engine}' is unavailable: {message}")]
    EngineUnavailable { engine: String, message: String },

    #[error("Thermodynamics engine '{engine}' failed: {message}")]
    EngineFailed { engine: String, message: String },

    #[error("Could not parse output of '{engine}': {output:?}")]
    Parse { engine: String, output: String },

    #[error("Engine returned a non-finite free energy ({0})")]
    NonFinite(f64),

    #[error("Oracle call exceeded the {seconds:.1}s timeout")]
    Timeout { seconds: f64 },
}

/// A thermodynamics engine that estimates the free energy of a two-strand complex.
///
/// Implementations must be deterministic for a given input and safe to share across threads,
/// since the screening pipeline may run a call on a helper thread to enforce a timeout.
pub trait BindingOracle: Send + Sync {
    /// Short engine name used in logs and error messages.
    fn name(&self) -> &str;

    /// Free energy (kcal/mol) of the complex formed by `strand_a` and `strand_b` under `model`.
    fn binding_free_energy(
        &self,
        strand_a: &RnaSequence,
        strand_b: &RnaSequence,
        model: &ThermoModel,
    ) -> Result<f64, OracleError>;
}
