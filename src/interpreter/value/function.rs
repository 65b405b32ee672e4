use std::{cell::RefCell, rc::Rc};

use crate::{ast::FunctionDecl, interpreter::environment::Environment};

/// A user-defined function value.
///
/// Created when a function-declaration statement executes. The captured
/// environment is the one current at declaration time, which is what makes
/// free-variable resolution lexical rather than dynamic.
pub struct FunctionValue {
    /// The declaration: name, parameters, return type, and body.
    pub decl: Rc<FunctionDecl>,
    /// The environment captured at the declaration site.
    pub env:  Rc<RefCell<Environment>>,
}

impl std::fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The captured environment may reference this value again, so only
        // the name is printed.
        f.debug_struct("FunctionValue")
         .field("name", &self.decl.name)
         .finish_non_exhaustive()
    }
}

/// The closed set of native functions.
///
/// Natives are dispatched by kind rather than stored as closures, which
/// keeps `Value` comparable and the call surface auditable in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeKind {
    /// `print(any) -> void`
    Print,
    /// `import_csv(string) -> void`
    ImportCsv,
    /// `csv_to_array(string) -> string[][]`
    CsvToArray,
    /// `row_length(string[][]) -> int`
    RowLength,
    /// `col_length(string[][]) -> int`
    ColLength,
    /// `generate_table(string[][], int) -> void`
    GenerateTable,
}

impl NativeKind {
    /// Every native, in registration order.
    pub const ALL: [Self; 6] = [Self::Print,
                                Self::ImportCsv,
                                Self::CsvToArray,
                                Self::RowLength,
                                Self::ColLength,
                                Self::GenerateTable];

    /// The name the native is registered under.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::ImportCsv => "import_csv",
            Self::CsvToArray => "csv_to_array",
            Self::RowLength => "row_length",
            Self::ColLength => "col_length",
            Self::GenerateTable => "generate_table",
        }
    }

    /// The number of arguments the native requires.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Print
            | Self::ImportCsv
            | Self::CsvToArray
            | Self::RowLength
            | Self::ColLength => 1,
            Self::GenerateTable => 2,
        }
    }
}
