/// Core parsing logic.
///
/// Contains the program entry point, primary and postfix expression
/// parsing, and the shared `ParseResult` alias.
pub mod core;

/// Unary operator parsing.
///
/// Handles the right-recursive prefix operators `+`, `-`, and `!`.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the precedence ladder for all binary operators, from logical
/// OR down to multiplication, each level left-associative.
pub mod binary;

/// Statement parsing.
///
/// Implements statement dispatch: declarations, control flow, blocks, and
/// function declarations.
pub mod statement;

/// Type grammar.
///
/// Parses declared types and enforces the array-type restriction at parse
/// time.
pub mod types;
