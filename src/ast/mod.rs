/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Core AST traits, wrappers and the `Program` root
/// - expressions: Definitions for various expression types
/// - statements: Definitions for various statement types
/// - types: Scalar types and their promotion rules
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
