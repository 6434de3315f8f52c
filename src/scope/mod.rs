//! Nested lexical scopes, shared by the semantic checker and the interpreter.

pub mod scope;
