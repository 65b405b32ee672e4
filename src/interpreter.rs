/// The environment module holds the lexical scope chain.
///
/// Environments map names to runtime values in two disjoint namespaces
/// (variables and functions) and reference their enclosing scope, enabling
/// shadowing across scopes, chain-walking lookup and assignment, and closure
/// capture.
///
/// # Responsibilities
/// - Defines the `Environment` scope type and its parent chain.
/// - Enforces the no-redeclaration rule within a single scope.
/// - Resolves reads and writes to the nearest declaring scope.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// applies operator semantics, manages environments, and propagates
/// control-flow signals (`break`, `continue`, `return`) as explicit results.
/// It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements against the scope chain.
/// - Implements the function-call protocol for user and native functions.
/// - Reports runtime errors such as division by zero or type mismatches.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind and source
///   location.
/// - Handles numeric, boolean, and string literals, identifiers, and
///   operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The native module bridges the language to its tabular collaborator.
///
/// Native functions are registered into the global environment under fixed
/// names and dispatched by kind. They check their own argument contracts and
/// delegate CSV reading and SQL generation to the tabular module.
///
/// # Responsibilities
/// - Implements `print`, `import_csv`, `csv_to_array`, `row_length`,
///   `col_length`, and `generate_table`.
/// - Wraps collaborator failures as positioned runtime errors.
pub mod native;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements. This enables later phases to analyze and execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location
///   info.
/// - Enforces the grammar-level restrictions on array types and initializers.
pub mod parser;
/// The token stream module provides the parser's cursor over tokens.
///
/// A `TokenStream` wraps the lexer's output and exposes peek, lookahead,
/// consume, expect, and probe operations, turning out-of-tokens and
/// wrong-token conditions into positioned parse errors.
pub mod token_stream;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation and
/// execution: integers, floating-point numbers, booleans, strings,
/// two-dimensional string arrays, functions, and void. It also provides type
/// queries, truthiness, conversions, and display formatting.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Enforces the array shape invariant at construction time.
/// - Provides widening between numeric types (e.g. int to float).
pub mod value;
