//! Tree-walking execution of checked programs.
//!
//! The interpreter keeps its own scope stack of typed slots and threads
//! `break` back up the call chain as a `Flow` result instead of global state.

pub mod interpreter;
pub mod value;

#[cfg(test)]
mod tests;
