use serde::{Deserialize, Serialize};

/// Scored outcome of one IRS candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub irs_sequence: String,
    pub inhibition_strand: String,
    pub recognition_strand: String,
    /// Free energy of the {IRS, target} complex, kcal/mol.
    pub dg1: f64,
    /// Free energy of the {IRS, reporter switch} complex, kcal/mol.
    pub dg2: f64,
    pub displacement_score: f64,
}

impl EvaluationResult {
    pub fn new(
        irs_sequence: String,
        inhibition_strand: String,
        recognition_strand: String,
        dg1: f64,
        dg2: f64,
    ) -> Self {
        Self {
            irs_sequence,
            inhibition_strand,
            recognition_strand,
            dg1,
            dg2,
            displacement_score: displacement_score(dg1, dg2),
        }
    }
}

/// `|ΔG1| - |ΔG2|`.
#[inline]
pub fn displacement_score(dg1: f64, dg2: f64) -> f64 {
    dg1.abs() - dg2.abs()
}

/// Evaluation results ordered ascending by displacement score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResults {
    results: Vec<EvaluationResult>,
}

impl RankedResults {
    /// Stable ascending sort; ties keep their input order.
    pub fn rank(mut results: Vec<EvaluationResult>) -> Self {
        results.sort_by(|a, b| a.displacement_score.total_cmp(&b.displacement_score));
        Self { results }
    }

    /// Wraps results that are already in ranked order (e.g. read back from an export).
    pub fn from_ranked(results: Vec<EvaluationResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvaluationResult> {
        self.results.iter()
    }

    pub fn top(&self, n: usize) -> &[EvaluationResult] {
        &self.results[..n.min(self.results.len())]
    }

    pub fn as_slice(&self) -> &[EvaluationResult] {
        &self.results
    }
}

impl<'a> IntoIterator for &'a RankedResults {
    type Item = &'a EvaluationResult;
    type IntoIter = std::slice::Iter<'a, EvaluationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(tag: &str, dg1: f64, dg2: f64) -> EvaluationResult {
        EvaluationResult::new(tag.to_string(), tag.to_string(), String::new(), dg1, dg2)
    }

    #[test]
    fn displacement_score_uses_magnitudes() {
        assert_eq!(displacement_score(-30.0, -10.0), 20.0);
        assert_eq!(displacement_score(-10.0, -30.0), -20.0);
        assert_eq!(displacement_score(5.0, -5.0), 0.0);
    }

    #[test]
    fn rank_sorts_ascending_and_is_stable() {
        let ranked = RankedResults::rank(vec![
            result("a", -30.0, -10.0),
            result("b", -10.0, -30.0),
            result("c", -20.0, -20.0),
            result("d", -25.0, -25.0),
        ]);
        let order: Vec<&str> = ranked.iter().map(|r| r.irs_sequence.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn top_is_truncated_to_available_results() {
        let ranked = RankedResults::rank(vec![result("a", -1.0, 0.0), result("b", -2.0, 0.0)]);
        assert_eq!(ranked.top(1).len(), 1);
        assert_eq!(ranked.top(10).len(), 2);
    }
}
