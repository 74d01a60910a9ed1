use super::config::ConfigError;
use crate::core::sequence::SequenceError;
use crate::core::thermo::oracle::OracleError;
use thiserror::Error;

/// Which partner strand an oracle call paired the IRS candidate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingPartner {
    Target,
    ReporterSwitch,
}

impl std::fmt::Display for BindingPartner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingPartner::Target => write!(f, "target"),
            BindingPartner::ReporterSwitch => write!(f, "reporter switch"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid sequence: {0}")]
    Sequence(#[from] SequenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Oracle failed for candidate {candidate} against the {partner}: {source}")]
    Oracle {
        candidate: usize,
        partner: BindingPartner,
        #[source]
        source: OracleError,
    },

    #[error("Screening was cancelled after {completed} of {total} candidates")]
    Cancelled { completed: usize, total: usize },
}
