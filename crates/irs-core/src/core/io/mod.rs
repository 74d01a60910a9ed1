//! # I/O Module
//!
//! Flat-file persistence of screening results. The ranked result set is exported as CSV with
//! one row per candidate in ranked order.

pub mod results_csv;
