use super::config::DesignTemplate;
use crate::core::sequence::{Nucleotide, RnaSequence};
use rand::Rng;
use std::fmt;
use tracing::{debug, instrument};

/// Where on the reference the complementary segment of the middle region is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    FivePrime,
    Center,
    ThreePrime,
}

impl Anchor {
    /// Scan order used when building the candidate pool.
    pub const ALL: [Anchor; 3] = [Anchor::FivePrime, Anchor::Center, Anchor::ThreePrime];
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::FivePrime => write!(f, "5'"),
            Anchor::Center => write!(f, "center"),
            Anchor::ThreePrime => write!(f, "3'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InhibitionCandidate {
    pub anchor: Anchor,
    /// Complementarity length asked for by the scan.
    pub requested_length: usize,
    /// Length of the complementary segment actually placed (may be shorter after clipping).
    pub complementary_length: usize,
    pub middle: RnaSequence,
    pub strand: RnaSequence,
}

/// Number of candidates [`generate_candidates`] emits for `template`, or `None` if it does not
/// fit in a `usize`.
pub fn pool_size(template: &DesignTemplate) -> Option<usize> {
    template
        .middle_length
        .checked_add(1)?
        .checked_mul(Anchor::ALL.len())
}

/// Reverse complement of the `length`-nt window of `reference` selected by `anchor`.
pub fn complementary_segment(reference: &RnaSequence, anchor: Anchor, length: usize) -> RnaSequence {
    let n = reference.len();
    let length = length.min(n);
    let window = match anchor {
        Anchor::FivePrime => reference.slice(0, length),
        Anchor::Center => {
            let center = n / 2;
            let start = center.saturating_sub(length / 2);
            let end = (start + length).min(n);
            reference.slice(start, end)
        }
        Anchor::ThreePrime => reference.slice(n - length, n),
    };
    window.reverse_complement()
}

fn random_filler(length: usize, rng: &mut impl Rng) -> impl Iterator<Item = Nucleotide> + '_ {
    (0..length).map(move |_| Nucleotide::ALL[rng.gen_range(0..Nucleotide::ALL.len())])
}

/// Builds the candidate pool: for each anchor in [`Anchor::ALL`] and each complementarity
/// length from `middle_length` down to 0, one strand of the form
/// `prefix + complementary segment + random filler + suffix`.
#[instrument(level = "debug", skip_all, fields(middle_length = template.middle_length))]
pub fn generate_candidates(
    template: &DesignTemplate,
    rng: &mut impl Rng,
) -> Vec<InhibitionCandidate> {
    let mut candidates = Vec::with_capacity(pool_size(template).unwrap_or_default());

    for anchor in Anchor::ALL {
        for requested_length in (0..=template.middle_length).rev() {
            let segment = complementary_segment(&template.reference, anchor, requested_length);
            let complementary_length = segment.len();
            let filler_length = template.middle_length - complementary_length;

            let middle: RnaSequence = segment
                .bases()
                .iter()
                .copied()
                .chain(random_filler(filler_length, rng))
                .collect();
            let strand = template.prefix.concat(&middle).concat(&template.suffix);

            candidates.push(InhibitionCandidate {
                anchor,
                requested_length,
                complementary_length,
                middle,
                strand,
            });
        }
    }

    debug!(count = candidates.len(), "Generated inhibition-strand candidates.");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn template() -> DesignTemplate {
        DesignTemplate::standard().unwrap()
    }

    #[test]
    fn pool_size_reports_overflow() {
        let mut oversized = template();
        oversized.middle_length = usize::MAX;
        assert_eq!(pool_size(&oversized), None);
        oversized.middle_length = usize::MAX / 2;
        assert_eq!(pool_size(&oversized), None);
    }

    #[test]
    fn pool_has_45_strands_of_24_nt() {
        let mut rng = StdRng::seed_from_u64(7);
        let candidates = generate_candidates(&template(), &mut rng);
        assert_eq!(candidates.len(), 45);
        assert_eq!(pool_size(&template()), Some(45));
        for c in &candidates {
            assert_eq!(c.strand.len(), 24);
            assert_eq!(c.middle.len(), 14);
            let s = c.strand.to_string();
            assert!(s.starts_with("GACUA"));
            assert!(s.ends_with("CUUUC"));
        }
    }

    #[test]
    fn order_is_anchor_major_with_descending_lengths() {
        let mut rng = StdRng::seed_from_u64(1);
        let candidates = generate_candidates(&template(), &mut rng);
        for (i, c) in candidates.iter().enumerate() {
            assert_eq!(c.anchor, Anchor::ALL[i / 15]);
            assert_eq!(c.requested_length, 14 - i % 15);
            assert_eq!(c.complementary_length, c.requested_length);
        }
    }

    #[test]
    fn full_five_prime_match_is_the_reference_reverse_complement() {
        let mut rng = StdRng::seed_from_u64(3);
        let candidates = generate_candidates(&template(), &mut rng);
        let first = &candidates[0];
        assert_eq!(first.anchor, Anchor::FivePrime);
        assert_eq!(first.requested_length, 14);
        assert_eq!(first.middle.to_string(), "GGCCUUUCGGCCUC");
        assert_eq!(first.strand.to_string(), "GACUAGGCCUUUCGGCCUCCUUUC");
    }

    #[test]
    fn anchored_segments_lead_the_middle_region() {
        let reference: RnaSequence = "GAGGCCGAAAGGCC".parse().unwrap();
        assert_eq!(
            complementary_segment(&reference, Anchor::FivePrime, 4).to_string(),
            "CCUC"
        );
        assert_eq!(
            complementary_segment(&reference, Anchor::ThreePrime, 4).to_string(),
            "GGCC"
        );
        // center = 7, start = 7 - 2 = 5, window = reference[5..9] = "CGAA"
        assert_eq!(
            complementary_segment(&reference, Anchor::Center, 4).to_string(),
            "UUCG"
        );
        assert!(complementary_segment(&reference, Anchor::Center, 0).is_empty());

        let mut rng = StdRng::seed_from_u64(11);
        let candidates = generate_candidates(&template(), &mut rng);
        for c in &candidates {
            let expected = complementary_segment(&reference, c.anchor, c.requested_length);
            assert_eq!(
                c.middle.slice(0, expected.len()),
                expected,
                "anchor {} length {}",
                c.anchor,
                c.requested_length
            );
        }
    }

    #[test]
    fn clipped_windows_are_padded_with_filler() {
        let short = DesignTemplate::new(
            "GACUA".parse().unwrap(),
            "CUUUC".parse().unwrap(),
            "GAGGCC".parse().unwrap(),
            14,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let candidates = generate_candidates(&short, &mut rng);
        assert_eq!(candidates.len(), 45);
        for c in &candidates {
            assert_eq!(c.middle.len(), 14);
            assert_eq!(c.strand.len(), 24);
            assert_eq!(c.complementary_length, c.requested_length.min(6));
        }
    }

    #[test]
    fn same_seed_reproduces_the_pool() {
        let a = generate_candidates(&template(), &mut StdRng::seed_from_u64(42));
        let b = generate_candidates(&template(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_length_middles_vary_between_runs() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut distinct = std::collections::HashSet::new();
        for _ in 0..20 {
            let candidates = generate_candidates(&template(), &mut rng);
            for c in candidates.iter().filter(|c| c.requested_length == 0) {
                distinct.insert(c.middle.to_string());
            }
        }
        assert!(distinct.len() > 1);
    }
}
