//! Lexical analysis module.
//!
//! Converts source text into a stream of tokens for parsing:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line and column tracking for error reporting
//! - Skipping of whitespace and `//` / `/* */` comments

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
