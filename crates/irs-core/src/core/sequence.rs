use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid nucleotide '{symbol}' at position {position}; expected one of A, U, C, G")]
    InvalidNucleotide { symbol: char, position: usize },
}

/// A single RNA base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nucleotide {
    A,
    U,
    C,
    G,
}

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::U, Nucleotide::C, Nucleotide::G];

    pub fn complement(self) -> Self {
        match self {
            Nucleotide::A => Nucleotide::U,
            Nucleotide::U => Nucleotide::A,
            Nucleotide::C => Nucleotide::G,
            Nucleotide::G => Nucleotide::C,
        }
    }

    pub fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Nucleotide::A),
            'U' => Some(Nucleotide::U),
            'C' => Some(Nucleotide::C),
            'G' => Some(Nucleotide::G),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::U => 'U',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
        }
    }

    /// Whether `self` (5' strand) and `other` (3' strand) form a Watson-Crick pair.
    #[inline]
    pub fn pairs_with(self, other: Nucleotide) -> bool {
        self.complement() == other
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// An immutable, validated RNA sequence over {A, U, C, G}.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RnaSequence {
    bases: Vec<Nucleotide>,
}

impl RnaSequence {
    pub fn new(bases: Vec<Nucleotide>) -> Self {
        Self { bases }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn bases(&self) -> &[Nucleotide] {
        &self.bases
    }

    /// Returns the subsequence `[start, end)`. Bounds are clipped to the sequence.
    pub fn slice(&self, start: usize, end: usize) -> RnaSequence {
        let end = end.min(self.bases.len());
        let start = start.min(end);
        Self::new(self.bases[start..end].to_vec())
    }

    pub fn reverse_complement(&self) -> RnaSequence {
        Self::new(self.bases.iter().rev().map(|b| b.complement()).collect())
    }

    pub fn concat(&self, other: &RnaSequence) -> RnaSequence {
        let mut bases = Vec::with_capacity(self.len() + other.len());
        bases.extend_from_slice(&self.bases);
        bases.extend_from_slice(&other.bases);
        Self::new(bases)
    }
}

impl FromStr for RnaSequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bases = s
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                Nucleotide::from_char(symbol)
                    .ok_or(SequenceError::InvalidNucleotide { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(bases))
    }
}

impl fmt::Display for RnaSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.bases {
            write!(f, "{}", base.to_char())?;
        }
        Ok(())
    }
}

impl FromIterator<Nucleotide> for RnaSequence {
    fn from_iter<I: IntoIterator<Item = Nucleotide>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Validates `seq` and returns its reverse complement.
pub fn reverse_complement(seq: &str) -> Result<RnaSequence, SequenceError> {
    Ok(seq.parse::<RnaSequence>()?.reverse_complement())
}
