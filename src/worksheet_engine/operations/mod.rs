//! Problem generators, one module per operation.
//!
//! Every module exposes the same signature:
//!
//! ```ignore
//! pub fn generate<R: Rng>(rng: &mut R, config: &WorksheetConfig) -> Problem
//! ```
//!
//! `generator.rs` validates the configuration first and then dispatches here,
//! so these functions may assume a valid range.

pub mod addition;
pub mod division;
pub mod multiplication;
pub mod subtraction;
