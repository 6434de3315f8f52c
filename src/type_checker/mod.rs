//! Static semantic checking.
//!
//! Walks a parsed `Program` once, before anything runs, and collects every
//! diagnostic instead of stopping at the first one:
//!
//! - Duplicate declarations in one scope and uses of undeclared names
//! - Assignments whose value type cannot be stored in the target
//! - String conditions and invalid operator/operand combinations
//! - `case` labels whose type does not fit the `switch`
//! - `break` outside any loop or switch

pub mod type_checker;

#[cfg(test)]
mod tests;
