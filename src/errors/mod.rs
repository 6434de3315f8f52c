//! Error types for every stage of the pipeline.
//!
//! - `errors`: syntax errors raised while tokenizing and parsing, with
//!   source positions and suggestions
//! - `diagnostics`: static diagnostics collected by the semantic checker
//! - `runtime`: fatal failures raised while executing a checked program

pub mod diagnostics;
pub mod errors;
pub mod runtime;
