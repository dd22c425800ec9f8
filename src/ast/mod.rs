/// AST (Abstract Syntax Tree) module
/// Contains the term and type trees the checkers walk
///
/// Submodules:
/// - ast: The `Term` union and its tags
/// - expressions: Expression node payloads
/// - statements: Declaration-like node payloads that scope over the rest of the program
/// - types: Type representations, substitution and display
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
