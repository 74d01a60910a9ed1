//! # Core Module
//!
//! Fundamental building blocks shared by the screening engine.
//!
//! - **Sequences** ([`sequence`]) - The RNA alphabet, validated sequences and reverse complements
//! - **Thermodynamics** ([`thermo`]) - Physical model settings and binding free-energy engines
//! - **Results** ([`results`]) - Evaluation records and the ranked result set
//! - **File I/O** ([`io`]) - CSV export and import of ranked screening results

pub mod io;
pub mod results;
pub mod sequence;
pub mod thermo;
