use crate::core::sequence::RnaSequence;
use crate::core::thermo::model::ThermoModel;
use crate::core::thermo::oracle::{BindingOracle, OracleError};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;
use tracing::{trace, warn};

/// Calls `oracle` for the complex `{strand_a, strand_b}`.
///
/// With a `timeout`, the call runs on a helper thread and the caller stops waiting once the
/// deadline passes. The helper thread is detached, not killed; its result is discarded.
pub fn binding_free_energy(
    oracle: &Arc<dyn BindingOracle>,
    strand_a: &RnaSequence,
    strand_b: &RnaSequence,
    model: &ThermoModel,
    timeout: Option<Duration>,
) -> Result<f64, OracleError> {
    let energy = match timeout {
        None => oracle.binding_free_energy(strand_a, strand_b, model)?,
        Some(limit) => call_with_deadline(oracle, strand_a, strand_b, model, limit)?,
    };

    if !energy.is_finite() {
        return Err(OracleError::NonFinite(energy));
    }
    trace!(engine = oracle.name(), energy, "Oracle call completed.");
    Ok(energy)
}

fn call_with_deadline(
    oracle: &Arc<dyn BindingOracle>,
    strand_a: &RnaSequence,
    strand_b: &RnaSequence,
    model: &ThermoModel,
    limit: Duration,
) -> Result<f64, OracleError> {
    let (sender, receiver) = mpsc::channel();
    let worker_oracle = Arc::clone(oracle);
    let (a, b, m) = (strand_a.clone(), strand_b.clone(), *model);

    std::thread::spawn(move || {
        let result = worker_oracle.binding_free_energy(&a, &b, &m);
        // The receiver is gone if the caller already timed out.
        let _ = sender.send(result);
    });

    match receiver.recv_timeout(limit) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            warn!(
                engine = oracle.name(),
                seconds = limit.as_secs_f64(),
                "Oracle call timed out."
            );
            Err(OracleError::Timeout {
                seconds: limit.as_secs_f64(),
            })
        }
        Err(RecvTimeoutError::Disconnected) => Err(OracleError::EngineFailed {
            engine: oracle.name().to_string(),
            message: "oracle worker thread terminated without a result".to_string(),
        }),
    }
}
