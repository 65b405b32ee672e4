//! # flowlang
//!
//! flowlang is an interpreter for the flow scripting language, written in
//! Rust. flow is a small, C-like language with lexical scoping, closures,
//! and built-in functions for importing CSV data and generating SQL from
//! it.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc, clippy::cast_possible_truncation)]

use std::io::Write;

use log::debug;

use crate::interpreter::{
    evaluator::core::Interpreter,
    lexer::tokenize,
    parser::core::parse_program,
    token_stream::TokenStream,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums and related types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to AST nodes for error reporting.
/// - Keeps the node set closed so the evaluator can match exhaustively.
pub mod ast;
/// Provides unified error types for lexing, parsing, and evaluation.
///
/// This module defines all errors that can be raised while interpreting
/// flow code. It standardizes error reporting and carries detailed
/// information about failures, including source locations for debugging and
/// user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line and column numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, environments, error handling, and the native-function
/// bridge to provide a complete runtime for flow programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides the execution pipeline used by [`run_program`].
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The tabular-data collaborator: CSV reading and SQL generation.
///
/// This module owns everything about tabular files: reading CSV into rows
/// of optional cells, inferring SQL column types, adjusting identifiers,
/// and rendering `CREATE TABLE`/`INSERT` statements. The interpreter talks
/// to it only through the native functions.
pub mod tabular;

/// Runs a flow program from source, writing its output to `out`.
///
/// The source is tokenized, parsed into a program, and executed; execution
/// runs the top-level statements and then calls `main`. The first error of
/// any phase stops the run and is returned.
///
/// # Errors
/// Returns the first lexical, parse, or runtime error the program hits.
///
/// # Examples
/// ```
/// use flowlang::run_program;
///
/// let source = r#"
///     void main() {
///         print("hello");
///     }
/// "#;
/// let mut out = Vec::new();
/// run_program(source, Box::new(&mut out)).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "hello\n");
/// ```
pub fn run_program(source: &str,
                   out: Box<dyn Write + '_>)
                   -> Result<(), Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    debug!("lexed {} token(s)", tokens.len());

    let mut tokens = TokenStream::new(tokens);
    let program = parse_program(&mut tokens)?;
    debug!("parsed {} top-level statement(s)", program.statements.len());

    let mut interpreter = Interpreter::new(out);
    interpreter.run(&program)?;
    Ok(())
}
