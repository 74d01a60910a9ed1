use crate::core::results::{EvaluationResult, RankedResults};
use crate::core::sequence::RnaSequence;
use crate::core::thermo::oracle::BindingOracle;
use crate::engine::cancel::CancellationToken;
use crate::engine::config::{ConfigError, ScreeningConfig};
use crate::engine::error::{BindingPartner, EngineError};
use crate::engine::evaluation;
use crate::engine::generator::{self, InhibitionCandidate};
use crate::engine::progress::{Progress, ProgressReporter};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, instrument};

struct PreparedRun {
    target: RnaSequence,
    recognition: RnaSequence,
    candidates: Vec<InhibitionCandidate>,
}

/// Screens the candidate pool against `target` and returns every result ranked ascending by
/// displacement score.
///
/// The run is fail-fast: the first invalid input, oracle failure or cancellation aborts it
/// and no partial results are returned.
#[instrument(skip_all, name = "screening_workflow", fields(engine = oracle.name()))]
pub fn run(
    target: &str,
    config: &ScreeningConfig,
    oracle: Arc<dyn BindingOracle>,
    rng: &mut impl Rng,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<RankedResults, EngineError> {
    // === Phase 1: Recognition strand and candidate pool ===
    let prepared = prepare(target, config, rng, reporter)?;

    // === Phase 2: Binding free energies ===
    let results = evaluate_candidates(&prepared, config, &oracle, reporter, cancel)?;

    // === Phase 3: Ranking ===
    reporter.report(Progress::PhaseStart { name: "Ranking" });
    let ranked = RankedResults::rank(results);
    reporter.report(Progress::PhaseFinish);

    if let (Some(first), Some(last)) = (ranked.as_slice().first(), ranked.as_slice().last()) {
        info!(
            lowest_score = first.displacement_score,
            highest_score = last.displacement_score,
            "Screening complete. Ranked {} candidate(s).",
            ranked.len()
        );
    }
    Ok(ranked)
}

fn prepare(
    target: &str,
    config: &ScreeningConfig,
    rng: &mut impl Rng,
    reporter: &ProgressReporter,
) -> Result<PreparedRun, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Generating Candidates",
    });

    let target: RnaSequence = target.parse()?;
    if target.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "target",
            reason: "target RNA must not be empty".to_string(),
        }
        .into());
    }
    let recognition = target.reverse_complement();
    info!(
        target = %target,
        recognition = %recognition,
        temperature_celsius = config.model.temperature_celsius(),
        "Preparing IRS screen."
    );

    let candidates = generator::generate_candidates(&config.template, rng);
    reporter.report(Progress::Message(format!(
        "{} inhibition-strand candidates generated",
        candidates.len()
    )));
    reporter.report(Progress::PhaseFinish);

    Ok(PreparedRun {
        target,
        recognition,
        candidates,
    })
}

fn evaluate_candidates(
    prepared: &PreparedRun,
    config: &ScreeningConfig,
    oracle: &Arc<dyn BindingOracle>,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<Vec<EvaluationResult>, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Evaluating Candidates",
    });
    let total = prepared.candidates.len();
    reporter.report(Progress::TaskStart {
        total: total as u64,
    });

    let recognition_text = prepared.recognition.to_string();
    let mut results = Vec::with_capacity(total);

    for (index, candidate) in prepared.candidates.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(EngineError::Cancelled {
                completed: index,
                total,
            });
        }

        let irs = candidate.strand.concat(&prepared.recognition);
        let dg1 = evaluation::binding_free_energy(
            oracle,
            &irs,
            &prepared.target,
            &config.model,
            config.call_timeout,
        )
        .map_err(|source| EngineError::Oracle {
            candidate: index,
            partner: BindingPartner::Target,
            source,
        })?;
        let dg2 = evaluation::binding_free_energy(
            oracle,
            &irs,
            &config.reporter_switch,
            &config.model,
            config.call_timeout,
        )
        .map_err(|source| EngineError::Oracle {
            candidate: index,
            partner: BindingPartner::ReporterSwitch,
            source,
        })?;

        let result = EvaluationResult::new(
            irs.to_string(),
            candidate.strand.to_string(),
            recognition_text.clone(),
            dg1,
            dg2,
        );
        debug!(
            index,
            anchor = %candidate.anchor,
            length = candidate.requested_length,
            dg1,
            dg2,
            score = result.displacement_score,
            "Candidate evaluated."
        );
        results.push(result);

        reporter.report(Progress::StatusUpdate {
            text: format!("candidate {}/{}", index + 1, total),
        });
        reporter.report(Progress::TaskIncrement { amount: 1 });
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    Ok(results)
}
