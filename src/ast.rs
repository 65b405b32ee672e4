/// A position in the source text.
///
/// Lines and columns are 1-based. Columns account for tab expansion: a tab
/// advances the column to the next multiple of four, relative to column 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    /// 1-based source line.
    pub line: usize,
    /// 1-based source column.
    pub col:  usize,
}

impl Pos {
    /// Creates a position from a line and column pair.
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

/// A declared type in the language.
///
/// Scalar types cover `int`, `float`, `bool`, `string`, and `void`. The only
/// array type the grammar admits is the two-dimensional string array
/// `string[][]`, which exists solely to hold tabular text data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// 32-bit signed integer, `int`.
    Int,
    /// 32-bit floating point, `float`.
    Float,
    /// Boolean, `bool`.
    Bool,
    /// Character string, `string`.
    Str,
    /// Absence of a value, `void`.
    Void,
    /// Two-dimensional string array, `string[][]`.
    StrGrid,
}

impl Type {
    /// Returns `true` for the `void` type.
    #[must_use]
    pub const fn is_void(self) -> bool {
        matches!(self, Self::Void)
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Str => "string",
            Self::Void => "void",
            Self::StrGrid => "string[][]",
        };
        write!(f, "{name}")
    }
}

/// Represents a literal value in the language.
///
/// `LiteralValue` covers all raw, constant values that can appear directly in
/// source code. It is used in the AST to represent literal expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 32-bit signed integer literal.
    Int(i32),
    /// A 32-bit floating-point literal.
    Float(f32),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A string literal, with escape sequences already decoded.
    Str(String),
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for LiteralValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` covers all expression forms, from literals and variables to calls,
/// arithmetic, assignment, and array-cell access. Each variant carries the
/// source position it was parsed at for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, or boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Position in the source code.
        pos:   Pos,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Position in the source code.
        pos:  Pos,
    },
    /// A unary operation (e.g. negation).
    Unary {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Position in the source code.
        pos:  Pos,
    },
    /// A binary operation (addition, comparison, etc.).
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Position in the source code.
        pos:   Pos,
    },
    /// An assignment expression.
    ///
    /// The target is restricted by the parser to a variable reference or a
    /// two-dimensional array-cell access.
    Assign {
        /// The assignment target.
        target: Box<Self>,
        /// The value being assigned.
        value:  Box<Self>,
        /// Position in the source code.
        pos:    Pos,
    },
    /// Function call expression (e.g. `add(1, 2)`).
    Call {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function, in order.
        arguments: Vec<Self>,
        /// Position in the source code.
        pos:       Pos,
    },
    /// Two-dimensional array-cell access, `arr[row][col]`.
    CellAccess {
        /// The array expression.
        array: Box<Self>,
        /// Row index expression.
        row:   Box<Self>,
        /// Column index expression.
        col:   Box<Self>,
        /// Position in the source code.
        pos:   Pos,
    },
}

impl Expr {
    /// Gets the source position from `self`.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::Literal { pos, .. }
            | Self::Variable { pos, .. }
            | Self::Unary { pos, .. }
            | Self::Binary { pos, .. }
            | Self::Assign { pos, .. }
            | Self::Call { pos, .. }
            | Self::CellAccess { pos, .. } => *pos,
        }
    }
}

/// A block of statements with its own lexical scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block, in source order.
    pub statements: Vec<Stmt>,
    /// Position of the opening brace.
    pub pos:        Pos,
}

/// One `if` or `else_if` arm: a condition and the block it guards.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBranch {
    /// The guard condition.
    pub condition: Expr,
    /// The block executed when the condition is truthy.
    pub body:      Block,
}

/// A function parameter: declared type and name.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The declared parameter type.
    pub ty:   Type,
    /// The parameter name.
    pub name: String,
}

/// A function declaration.
///
/// Functions capture the environment they are declared in when the
/// declaration statement executes, which is what enables closures.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The declared return type.
    pub return_type: Type,
    /// The function name.
    pub name:        String,
    /// The ordered parameter list.
    pub params:      Vec<Param>,
    /// The function body.
    pub body:        Block,
    /// Position in the source code.
    pub pos:         Pos,
}

/// Represents a statement.
///
/// Statements are the units that make up blocks and the top level of a
/// program.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A variable declaration with a mandatory initializer.
    Declaration {
        /// The declared type.
        ty:   Type,
        /// The variable name.
        name: String,
        /// The initializer expression.
        init: Expr,
        /// Position in the source code.
        pos:  Pos,
    },
    /// A standalone expression evaluated for its effect.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Position in the source code.
        pos:  Pos,
    },
    /// An `if` statement with optional `else_if` arms and `else` block.
    ///
    /// `branches` always holds at least the leading `if` arm.
    If {
        /// The `if` arm followed by any `else_if` arms, in order.
        branches:  Vec<ConditionalBranch>,
        /// The trailing `else` block, if present.
        else_body: Option<Block>,
        /// Position in the source code.
        pos:       Pos,
    },
    /// A `while` loop.
    While {
        /// The loop condition.
        condition: Expr,
        /// The loop body.
        body:      Block,
        /// Position in the source code.
        pos:       Pos,
    },
    /// A `for` loop. Any of init, condition, and post may be omitted.
    For {
        /// Initializer expression, run once before the loop.
        init:      Option<Expr>,
        /// Loop condition; absent means always true.
        condition: Option<Expr>,
        /// Post expression, run after each iteration (including after
        /// `continue`).
        post:      Option<Expr>,
        /// The loop body.
        body:      Block,
        /// Position in the source code.
        pos:       Pos,
    },
    /// A `return` statement with an optional value.
    Return {
        /// The returned expression, absent for `return;`.
        value: Option<Expr>,
        /// Position in the source code.
        pos:   Pos,
    },
    /// A `break` statement.
    Break {
        /// Position in the source code.
        pos: Pos,
    },
    /// A `continue` statement.
    Continue {
        /// Position in the source code.
        pos: Pos,
    },
    /// A function declaration.
    Function(FunctionDecl),
}

impl Stmt {
    /// Gets the source position from `self`.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::Declaration { pos, .. }
            | Self::Expression { pos, .. }
            | Self::If { pos, .. }
            | Self::While { pos, .. }
            | Self::For { pos, .. }
            | Self::Return { pos, .. }
            | Self::Break { pos }
            | Self::Continue { pos } => *pos,
            Self::Function(decl) => decl.pos,
        }
    }
}

/// A parsed program: the ordered list of top-level statements.
///
/// Top-level statements are executed once to populate the global scope, then
/// `main` is looked up and called.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Stmt>,
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons, and logic.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`), also string concatenation.
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic identity (e.g. `+x`).
    Plus,
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::And => "&&",
            Self::Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Negate => "-",
            Self::Not => "!",
        };
        write!(f, "{operator}")
    }
}
