/// The interpreter state and expression evaluation.
///
/// Defines the `Interpreter` struct, the `run` entry point that executes a
/// program and calls `main`, and the expression evaluator.
pub mod core;

/// Binary operator semantics.
pub mod binary;

/// Unary operator semantics.
pub mod unary;

/// Statement execution and control-flow signals.
pub mod statement;

/// The function-call protocol for user-defined functions.
pub mod function;
