//! # Thermodynamics Module
//!
//! Physical model settings and the binding free-energy engines used to score IRS candidates.
//!
//! - **Model** ([`model`]) - Material and temperature of the physical model
//! - **Oracle** ([`oracle`]) - The [`oracle::BindingOracle`] seam every engine implements
//! - **Nearest-Neighbor Engine** ([`nearest_neighbor`]) - Built-in RNA duplex ensemble model
//! - **Cofold Engine** ([`cofold`]) - Wrapper around an external ViennaRNA `RNAcofold` executable
//!
//! Energies are reported in kcal/mol throughout.

pub mod cofold;
pub mod model;
pub mod nearest_neighbor;
pub mod oracle;
pub mod params;
