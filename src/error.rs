/// Lexical errors.
///
/// Defines all error types that can occur while tokenizing source text.
/// Lexical errors include unknown characters, overlong tokens, malformed
/// number literals, and unterminated strings.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur during parsing of the token
/// stream. Parse errors include unexpected tokens, invalid assignment
/// targets, and the grammar restrictions on array types and initializers.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution. Runtime errors include things like division by zero, type
/// mismatches, scope violations, and failures reported by native functions.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
