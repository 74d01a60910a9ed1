//! # Workflows Module
//!
//! Top-level entry points of the library. A workflow validates its inputs, drives the engine
//! through its phases, reports progress and returns the finished result.
//!
//! - **Screening Workflow** ([`screen`]) - Generate, evaluate and rank IRS candidates for one
//!   target RNA.

pub mod screen;
