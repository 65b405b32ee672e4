use crate::ast::Pos;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an undeclared variable.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// Called an unknown function.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// Tried to declare a name that already exists in the same scope.
    Redeclaration {
        /// The name being redeclared.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// Called something that is not a function value.
    NotCallable {
        /// The name that was called.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// The wrong number of arguments was supplied to a function.
    ArityMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
        /// The source position where the error occurred.
        pos:      Pos,
    },
    /// A value had an unexpected or incompatible type.
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// The source position where the error occurred.
        pos:     Pos,
    },
    /// An operator was applied to a value kind that does not support it.
    UnsupportedOperator {
        /// The operator as written.
        op:        String,
        /// The kind of the offending value.
        type_name: String,
        /// The source position where the error occurred.
        pos:       Pos,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source position where the error occurred.
        pos: Pos,
    },
    /// Attempted modulo with a zero divisor.
    ModuloByZero {
        /// The source position where the error occurred.
        pos: Pos,
    },
    /// Tried to access an array cell outside the valid bounds.
    IndexOutOfBounds {
        /// The requested index.
        index: i32,
        /// The number of elements available.
        len:   usize,
        /// The source position where the error occurred.
        pos:   Pos,
    },
    /// An array did not satisfy the two-dimensional string-array shape.
    DimensionMismatch {
        /// Details about the shape violation.
        details: String,
        /// The source position where the error occurred.
        pos:     Pos,
    },
    /// A `break` statement executed outside any loop.
    BreakOutsideLoop {
        /// The source position where the error occurred.
        pos: Pos,
    },
    /// A `continue` statement executed outside any loop.
    ContinueOutsideLoop {
        /// The source position where the error occurred.
        pos: Pos,
    },
    /// A `return` statement executed outside any function.
    ReturnOutsideFunction {
        /// The source position where the error occurred.
        pos: Pos,
    },
    /// A `void` function returned a value.
    UnexpectedReturnValue {
        /// The name of the function.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// A non-`void` function produced no return value.
    MissingReturnValue {
        /// The name of the function.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// A native function received arguments violating its contract.
    NativeContract {
        /// The name of the native function.
        name:    String,
        /// Details about the violation.
        details: String,
        /// The source position of the call.
        pos:     Pos,
    },
    /// An I/O failure reported by the tabular collaborator.
    Io {
        /// Details about the failure.
        details: String,
        /// The source position of the call.
        pos:     Pos,
    },
    /// The program does not define a callable `main` function.
    MissingMain,
    /// `main` exists but has parameters or a non-`void` return type.
    InvalidMainSignature {
        /// Details about the signature violation.
        details: String,
        /// The source position of the declaration.
        pos:     Pos,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, pos } => {
                write!(f, "Error on {pos}: Unknown variable '{name}'.")
            },
            Self::UnknownFunction { name, pos } => {
                write!(f, "Error on {pos}: Unknown function '{name}'.")
            },
            Self::Redeclaration { name, pos } => write!(f,
                                                        "Error on {pos}: '{name}' is already declared in this scope."),
            Self::NotCallable { name, pos } => {
                write!(f, "Error on {pos}: '{name}' is not a function.")
            },
            Self::ArityMismatch { name,
                                  expected,
                                  found,
                                  pos, } => write!(f,
                                                   "Error on {pos}: Function '{name}' expects {expected} argument(s), found {found}."),
            Self::TypeMismatch { details, pos } => {
                write!(f, "Error on {pos}: Type error: {details}.")
            },
            Self::UnsupportedOperator { op, type_name, pos } => write!(f,
                                                                      "Error on {pos}: Operator '{op}' is not supported for {type_name} values."),
            Self::DivisionByZero { pos } => write!(f, "Error on {pos}: Division by zero."),
            Self::ModuloByZero { pos } => write!(f, "Error on {pos}: Modulo by zero."),
            Self::IndexOutOfBounds { index, len, pos } => write!(f,
                                                                 "Error on {pos}: Index {index} is out of bounds for length {len}."),
            Self::DimensionMismatch { details, pos } => {
                write!(f, "Error on {pos}: Array shape error: {details}.")
            },
            Self::BreakOutsideLoop { pos } => {
                write!(f, "Error on {pos}: 'break' outside of a loop.")
            },
            Self::ContinueOutsideLoop { pos } => {
                write!(f, "Error on {pos}: 'continue' outside of a loop.")
            },
            Self::ReturnOutsideFunction { pos } => {
                write!(f, "Error on {pos}: 'return' outside of a function.")
            },
            Self::UnexpectedReturnValue { name, pos } => write!(f,
                                                                "Error on {pos}: Void function '{name}' must not return a value."),
            Self::MissingReturnValue { name, pos } => write!(f,
                                                             "Error on {pos}: Function '{name}' must return a value."),
            Self::NativeContract { name, details, pos } => {
                write!(f, "Error on {pos}: '{name}': {details}.")
            },
            Self::Io { details, pos } => write!(f, "Error on {pos}: I/O error: {details}."),
            Self::MissingMain => write!(f, "Error: Program does not define a 'main' function."),
            Self::InvalidMainSignature { details, pos } => {
                write!(f, "Error on {pos}: Invalid 'main' signature: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
