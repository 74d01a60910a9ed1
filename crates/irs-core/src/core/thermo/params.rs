//! RNA Watson-Crick nearest-neighbor parameters.
//!
//! Xia, SantaLucia, Burkard, Kierzek, Schroeder, Jiao, Cox & Turner (1998),
//! Biochemistry 37: 14719-14735. Enthalpies in kcal/mol, entropies in cal/(mol·K).

use crate::core::sequence::Nucleotide;
use crate::core::sequence::Nucleotide::{A, C, G, U};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnthalpyEntropy {
    pub dh: f64,
    pub ds: f64,
}

impl EnthalpyEntropy {
    pub const ZERO: EnthalpyEntropy = EnthalpyEntropy { dh: 0.0, ds: 0.0 };

    const fn new(dh: f64, ds: f64) -> Self {
        Self { dh, ds }
    }

    /// ΔG = ΔH - TΔS, in kcal/mol.
    #[inline]
    pub fn free_energy(&self, temperature_kelvin: f64) -> f64 {
        self.dh - temperature_kelvin * self.ds / 1000.0
    }
}

impl std::ops::Add for EnthalpyEntropy {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.dh + rhs.dh, self.ds + rhs.ds)
    }
}

impl std::ops::AddAssign for EnthalpyEntropy {
    fn add_assign(&mut self, rhs: Self) {
        self.dh += rhs.dh;
        self.ds += rhs.ds;
    }
}

impl std::ops::Sub for EnthalpyEntropy {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.dh - rhs.dh, self.ds - rhs.ds)
    }
}

pub const HELIX_INITIATION: EnthalpyEntropy = EnthalpyEntropy::new(3.61, -1.5);
pub const TERMINAL_AU: EnthalpyEntropy = EnthalpyEntropy::new(3.72, 10.5);
pub const SYMMETRY: EnthalpyEntropy = EnthalpyEntropy::new(0.0, -1.4);

/// Stack of the 5'-`first` `second`-3' dinucleotide on its Watson-Crick complement.
pub fn stack(first: Nucleotide, second: Nucleotide) -> EnthalpyEntropy {
    match (first, second) {
        (A, A) | (U, U) => EnthalpyEntropy::new(-6.82, -19.0),
        (A, U) => EnthalpyEntropy::new(-9.38, -26.7),
        (U, A) => EnthalpyEntropy::new(-7.69, -20.5),
        (C, U) | (A, G) => EnthalpyEntropy::new(-10.48, -27.1),
        (C, A) | (U, G) => EnthalpyEntropy::new(-10.44, -26.9),
        (G, U) | (A, C) => EnthalpyEntropy::new(-11.40, -29.5),
        (G, A) | (U, C) => EnthalpyEntropy::new(-12.44, -32.5),
        (C, G) => EnthalpyEntropy::new(-10.64, -26.7),
        (G, G) | (C, C) => EnthalpyEntropy::new(-13.39, -32.7),
        (G, C) => EnthalpyEntropy::new(-14.88, -36.9),
    }
}

/// Penalty applied at each helix end closed by an A-U pair.
#[inline]
pub fn terminal_penalty(base: Nucleotide) -> EnthalpyEntropy {
    match base {
        A | U => TERMINAL_AU,
        C | G => EnthalpyEntropy::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_is_symmetric_under_strand_exchange() {
        for x in Nucleotide::ALL {
            for y in Nucleotide::ALL {
                assert_eq!(stack(x, y), stack(y.complement(), x.complement()));
            }
        }
    }

    #[test]
    fn gc_stack_is_most_stable_at_body_temperature() {
        let t = 310.15;
        let gc = stack(G, C).free_energy(t);
        for x in Nucleotide::ALL {
            for y in Nucleotide::ALL {
                assert!(stack(x, y).free_energy(t) >= gc - 1e-12);
            }
        }
        assert!((gc - (-3.435)).abs() < 0.01);
    }
}
