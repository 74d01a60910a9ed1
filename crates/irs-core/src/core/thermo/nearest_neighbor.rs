use super::model::ThermoModel;
use super::oracle::{BindingOracle, OracleError};
use super::params::{self, EnthalpyEntropy};
use crate::core::sequence::RnaSequence;
use tracing::trace;

const ENGINE_NAME: &str = "nearest-neighbor";

/// Shortest helix (in base pairs) admitted to the ensemble.
pub const MIN_HELIX_PAIRS: usize = 2;

/// A contiguous antiparallel helix between two strands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helix {
    /// 0-based index on strand A of the 5'-most paired base.
    pub start_a: usize,
    /// 0-based index on strand B of the base paired with `start_a`.
    pub end_b: usize,
    pub pairs: usize,
    pub free_energy: f64,
}

/// Two-strand ensemble model over single contiguous Watson-Crick helices.
///
/// Every antiparallel helix of at least [`MIN_HELIX_PAIRS`] pairs contributes a Boltzmann
/// weight; the unbound pair of strands is the reference state with weight 1. The reported
/// free energy is `-RT ln Z`, so strands that cannot pair score exactly zero.
#[derive(Debug, Clone, Default)]
pub struct NearestNeighborOracle;

impl NearestNeighborOracle {
    pub fn new() -> Self {
        Self
    }

    /// Enumerates every admissible helix with its free energy at the model temperature.
    pub fn helices(
        &self,
        strand_a: &RnaSequence,
        strand_b: &RnaSequence,
        model: &ThermoModel,
    ) -> Vec<Helix> {
        let a = strand_a.bases();
        let b = strand_b.bases();
        let (la, lb) = (a.len(), b.len());
        if la == 0 || lb == 0 {
            return Vec::new();
        }

        let t = model.temperature_kelvin();
        let symmetric = strand_a == strand_b;
        let mut helices = Vec::new();

        for diagonal in 0..(la + lb - 1) {
            let i_min = diagonal.saturating_sub(lb - 1);
            let i_max = diagonal.min(la - 1);

            let mut run_start: Option<usize> = None;
            for i in i_min..=i_max + 1 {
                let paired = i <= i_max && a[i].pairs_with(b[diagonal - i]);
                match (paired, run_start) {
                    (true, None) => run_start = Some(i),
                    (false, Some(start)) => {
                        collect_run(a, diagonal, start, i - 1, t, symmetric, &mut helices);
                        run_start = None;
                    }
                    _ => {}
                }
            }
        }
        helices
    }

    /// The single most stable helix, if any.
    pub fn best_helix(
        &self,
        strand_a: &RnaSequence,
        strand_b: &RnaSequence,
        model: &ThermoModel,
    ) -> Option<Helix> {
        self.helices(strand_a, strand_b, model)
            .into_iter()
            .min_by(|x, y| x.free_energy.total_cmp(&y.free_energy))
    }
}

fn collect_run(
    a: &[crate::core::sequence::Nucleotide],
    diagonal: usize,
    first: usize,
    last: usize,
    temperature_kelvin: f64,
    symmetric: bool,
    out: &mut Vec<Helix>,
) {
    let n = last - first + 1;
    if n < MIN_HELIX_PAIRS {
        return;
    }

    // prefix[k] = sum of stacks between pairs first..first+k
    let mut prefix = Vec::with_capacity(n);
    prefix.push(EnthalpyEntropy::ZERO);
    for k in first..last {
        let next = prefix[prefix.len() - 1] + params::stack(a[k], a[k + 1]);
        prefix.push(next);
    }

    for s in 0..n {
        for e in (s + MIN_HELIX_PAIRS - 1)..n {
            let mut total = params::HELIX_INITIATION + (prefix[e] - prefix[s]);
            total += params::terminal_penalty(a[first + s]);
            total += params::terminal_penalty(a[first + e]);
            if symmetric {
                total += params::SYMMETRY;
            }
            out.push(Helix {
                start_a: first + s,
                end_b: diagonal - (first + s),
                pairs: e - s + 1,
                free_energy: total.free_energy(temperature_kelvin),
            });
        }
    }
}

/// `-RT ln(1 + Σ exp(-ΔG_i / RT))`, evaluated with log-sum-exp.
fn ensemble_free_energy(energies: impl Iterator<Item = f64>, rt: f64) -> f64 {
    let exponents: Vec<f64> = std::iter::once(0.0)
        .chain(energies.map(|g| -g / rt))
        .collect();
    let max = exponents.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sum: f64 = exponents.iter().map(|x| (x - max).exp()).sum();
    -rt * (max + sum.ln())
}

impl BindingOracle for NearestNeighborOracle {
    fn name(&self) -> &str {
        ENGINE_NAME
    }

    fn binding_free_energy(
        &self,
        strand_a: &RnaSequence,
        strand_b: &RnaSequence,
        model: &ThermoModel,
    ) -> Result<f64, OracleError> {
        if strand_a.is_empty() || strand_b.is_empty() {
            return Err(OracleError::InvalidInput(
                "both strands must be non-empty".to_string(),
            ));
        }

        let helices = self.helices(strand_a, strand_b, model);
        let energy = ensemble_free_energy(helices.iter().map(|h| h.free_energy), model.rt());
        trace!(
            helices = helices.len(),
            energy, "Nearest-neighbor ensemble evaluated."
        );

        if !energy.is_finite() {
            return Err(OracleError::NonFinite(energy));
        }
        Ok(energy)
    }
}
