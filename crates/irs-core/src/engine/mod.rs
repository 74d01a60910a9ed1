//! # Engine Module
//!
//! The screening engine: candidate generation from a design template, guarded evaluation of
//! candidates against a [`crate::core::thermo::oracle::BindingOracle`], configuration and
//! progress reporting.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Design template, physical model and run parameters
//! - **Candidate Generation** ([`generator`]) - Combinatorial inhibition-strand pool
//! - **Evaluation** ([`evaluation`]) - Oracle calls with an optional per-call deadline
//! - **Cancellation** ([`cancel`]) - Cooperative cancellation of a running screen
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front-ends
//! - **Error Handling** ([`error`]) - Engine error taxonomy

pub mod cancel;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod progress;
