use crate::ast::Pos;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during parsing.
///
/// The parser halts at the first error; there is no recovery or multi-error
/// batching.
pub enum ParseError {
    /// Encountered a token that does not fit the grammar at this point.
    UnexpectedToken {
        /// Description of what was expected and what was found.
        token: String,
        /// The source position where the error occurred.
        pos:   Pos,
    },
    /// The token stream ended while more input was required.
    UnexpectedEndOfInput {
        /// The position of the last token seen.
        pos: Pos,
    },
    /// The left-hand side of an assignment is not a variable or a
    /// two-dimensional array cell.
    InvalidAssignmentTarget {
        /// The source position where the error occurred.
        pos: Pos,
    },
    /// An array type other than `string[][]` was written.
    InvalidArrayType {
        /// The offending type as written.
        found: String,
        /// The source position where the error occurred.
        pos:   Pos,
    },
    /// An array-typed declaration whose initializer is not a direct
    /// `csv_to_array(...)` call.
    InvalidArrayInitializer {
        /// The name of the declared variable.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// A variable declaration without an initializer.
    MissingInitializer {
        /// The name of the declared variable.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// A bare `{` block used as a statement.
    ///
    /// Blocks may only appear as the body of a function or control
    /// construct.
    BareBlock {
        /// The source position where the error occurred.
        pos: Pos,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, pos } => {
                write!(f, "Error on {pos}: {token}")
            },

            Self::UnexpectedEndOfInput { pos } => {
                write!(f, "Error on {pos}: Unexpected end of input.")
            },

            Self::InvalidAssignmentTarget { pos } => write!(f,
                                                            "Error on {pos}: Invalid assignment target; expected a variable or array cell."),

            Self::InvalidArrayType { found, pos } => write!(f,
                                                            "Error on {pos}: Invalid array type '{found}'; the only array type is 'string[][]'."),

            Self::InvalidArrayInitializer { name, pos } => write!(f,
                                                                  "Error on {pos}: Array variable '{name}' must be initialized with a 'csv_to_array' call."),

            Self::MissingInitializer { name, pos } => {
                write!(f, "Error on {pos}: Variable '{name}' must be initialized.")
            },

            Self::BareBlock { pos } => write!(f,
                                              "Error on {pos}: A block may not appear as a standalone statement."),
        }
    }
}

impl std::error::Error for ParseError {}
