//! # IRS Screen Core Library
//!
//! Generation and thermodynamic ranking of inhibitory RNA strand (IRS) designs for
//! strand-displacement reporter switches.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless sequence types, the physical model, the
//!   [`core::thermo::oracle::BindingOracle`] seam with its shipped engines, and CSV I/O
//!   for screening results.
//!
//! - **[`engine`]: The Logic Core.** Candidate generation from the design template,
//!   evaluation guards (timeouts, cancellation), configuration and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into the complete
//!   screening procedure for a single target RNA.

pub mod core;
pub mod engine;
pub mod workflows;
