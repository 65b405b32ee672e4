use crate::ast::Pos;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during tokenization.
///
/// Lexing is fail-fast: the first lexical error halts tokenization and is
/// reported with the position of the offending text.
pub enum LexError {
    /// Encountered a character no token pattern matches.
    UnknownCharacter {
        /// The offending text.
        lexeme: String,
        /// The source position where the error occurred.
        pos:    Pos,
    },
    /// A single token exceeded the maximum allowed length.
    OverlongToken {
        /// The length of the offending token.
        length: usize,
        /// The source position where the error occurred.
        pos:    Pos,
    },
    /// A float literal with a leading or trailing dot and no digits on the
    /// other side.
    MalformedNumber {
        /// The offending literal text.
        lexeme: String,
        /// The source position where the error occurred.
        pos:    Pos,
    },
    /// A numeric literal outside the representable range.
    NumberOutOfRange {
        /// The offending literal text.
        lexeme: String,
        /// The source position where the error occurred.
        pos:    Pos,
    },
    /// A string literal that is never closed.
    UnterminatedString {
        /// The source position where the string starts.
        pos: Pos,
    },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCharacter { lexeme, pos } => {
                write!(f, "Error on {pos}: Unknown character '{lexeme}'.")
            },
            Self::OverlongToken { length, pos } => write!(f,
                                                          "Error on {pos}: Token of length {length} exceeds the maximum of 256 characters."),
            Self::MalformedNumber { lexeme, pos } => {
                write!(f, "Error on {pos}: Malformed number literal '{lexeme}'.")
            },
            Self::NumberOutOfRange { lexeme, pos } => {
                write!(f, "Error on {pos}: Number literal '{lexeme}' is out of range.")
            },
            Self::UnterminatedString { pos } => {
                write!(f, "Error on {pos}: Unterminated string literal.")
            },
        }
    }
}

impl std::error::Error for LexError {}
