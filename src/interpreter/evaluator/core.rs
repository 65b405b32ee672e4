use std::{cell::RefCell, io::Write, rc::Rc};

use log::debug;

use crate::{
    ast::{Expr, Pos, Program},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{binary::apply_binary, statement::Signal, unary::apply_unary},
        value::{core::Value, function::NativeKind},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Holds the runtime evaluation state.
///
/// The interpreter owns the global environment and the output sink that
/// `print` and the tabular natives write to. Child environments are created
/// per block and per call; the global one lives for the whole run.
pub struct Interpreter<'out> {
    /// The global environment, pre-seeded with the native functions.
    pub(crate) globals: Rc<RefCell<Environment>>,
    /// Output sink for `print` and the tabular natives.
    pub(crate) out:     Box<dyn Write + 'out>,
}

impl<'out> Interpreter<'out> {
    /// Creates an interpreter writing its output to `out`.
    #[must_use]
    pub fn new(out: Box<dyn Write + 'out>) -> Self {
        let globals = Environment::new();
        for kind in NativeKind::ALL {
            globals.borrow_mut().define_native(kind.name(), Value::Native(kind));
        }
        Self { globals, out }
    }

    /// Runs a parsed program.
    ///
    /// Top-level statements execute first, against the global environment;
    /// this is where function declarations and global variables take
    /// effect. Afterwards `main` is looked up and called. `main` must
    /// exist, take no parameters, and be declared `void`.
    ///
    /// # Errors
    /// Any `RuntimeError` raised during execution, including control-flow
    /// signals escaping their context at the top level.
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        debug!("executing {} top-level statement(s)", program.statements.len());

        let globals = Rc::clone(&self.globals);
        for stmt in &program.statements {
            match self.execute(stmt, &globals)? {
                Signal::Normal => {},
                Signal::Break(pos) => return Err(RuntimeError::BreakOutsideLoop { pos }),
                Signal::Continue(pos) => {
                    return Err(RuntimeError::ContinueOutsideLoop { pos });
                },
                Signal::Return(_, pos) => {
                    return Err(RuntimeError::ReturnOutsideFunction { pos });
                },
            }
        }

        let main = globals.borrow().get_function("main");
        let Some(Value::Function(func)) = main else {
            return Err(RuntimeError::MissingMain);
        };
        if !func.decl.params.is_empty() {
            return Err(RuntimeError::InvalidMainSignature { details: format!("expected no parameters, found {}",
                                                                             func.decl.params.len()),
                                                            pos:     func.decl.pos, });
        }
        if !func.decl.return_type.is_void() {
            return Err(RuntimeError::InvalidMainSignature { details: format!("expected return type 'void', found '{}'",
                                                                             func.decl.return_type),
                                                            pos:     func.decl.pos, });
        }

        debug!("calling main");
        self.call_function(&func, Vec::new(), func.decl.pos)?;
        Ok(())
    }

    /// Evaluates an expression to a value.
    ///
    /// Dispatches on the expression variant: literals construct their value
    /// directly, identifiers walk the environment chain, operators evaluate
    /// operands left-to-right, and calls resolve the callee in the function
    /// namespace before evaluating arguments.
    ///
    /// # Errors
    /// Any `RuntimeError` raised by the expression or a subexpression.
    pub fn eval(&mut self,
                expr: &Expr,
                env: &Rc<RefCell<Environment>>)
                -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, pos } => {
                env.borrow()
                   .get_variable(name)
                   .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                  pos:  *pos, })
            },
            Expr::Unary { op, expr, pos } => {
                let value = self.eval(expr, env)?;
                apply_unary(*op, &value, *pos)
            },
            Expr::Binary { left, op, right, pos } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                apply_binary(&left, *op, &right, *pos)
            },
            Expr::Assign { target, value, pos } => {
                let value = self.eval(value, env)?;
                self.assign(target, value, env, *pos)
            },
            Expr::Call { name, arguments, pos } => self.eval_call(name, arguments, env, *pos),
            Expr::CellAccess { array, row, col, pos } => {
                let (row_cells, col_index) = self.resolve_cell(array, row, col, env, *pos)?;
                let cell = row_cells.borrow()
                                    .get(col_index)
                                    .cloned();
                cell.ok_or_else(|| RuntimeError::IndexOutOfBounds { index: col_index as i32,
                                                                    len:   row_cells.borrow().len(),
                                                                    pos:   *pos, })
            },
        }
    }

    /// Performs an assignment to an already-evaluated right-hand value.
    ///
    /// An identifier target mutates the nearest enclosing scope that
    /// declared it. A cell target mutates the addressed cell of a
    /// two-dimensional string array in place; the new value must be a
    /// string so the array keeps its element type. The assigned value is
    /// also the expression's result, which is what makes `a = b = 20`
    /// work.
    fn assign(&mut self,
              target: &Expr,
              value: Value,
              env: &Rc<RefCell<Environment>>,
              pos: Pos)
              -> EvalResult<Value> {
        match target {
            Expr::Variable { name, pos } => {
                if env.borrow_mut().assign(name, value.clone()) {
                    Ok(value)
                } else {
                    Err(RuntimeError::UnknownVariable { name: name.clone(),
                                                        pos:  *pos, })
                }
            },
            Expr::CellAccess { array, row, col, pos } => {
                if !matches!(value, Value::Str(_)) {
                    return Err(RuntimeError::TypeMismatch { details: format!("array cells hold strings, cannot assign {}",
                                                                             value.type_name()),
                                                            pos:     *pos, });
                }
                let (row_cells, col_index) = self.resolve_cell(array, row, col, env, *pos)?;
                let len = row_cells.borrow().len();
                if col_index >= len {
                    return Err(RuntimeError::IndexOutOfBounds { index: col_index as i32,
                                                                len,
                                                                pos: *pos, });
                }
                row_cells.borrow_mut()[col_index] = value.clone();
                Ok(value)
            },
            // The parser only admits the two targets above.
            _ => Err(RuntimeError::TypeMismatch { details: "invalid assignment target".to_string(),
                                                  pos }),
        }
    }

    /// Resolves `array[row][col]` down to the row's shared cell buffer and
    /// the column index. The column bounds are left to the caller, which
    /// needs the row for the mutation or read anyway.
    fn resolve_cell(&mut self,
                    array: &Expr,
                    row: &Expr,
                    col: &Expr,
                    env: &Rc<RefCell<Environment>>,
                    pos: Pos)
                    -> EvalResult<(Rc<RefCell<Vec<Value>>>, usize)> {
        let base = self.eval(array, env)?;
        let Value::Array(rows) = base else {
            return Err(RuntimeError::TypeMismatch { details: format!("expected a string[][] value, found {}",
                                                                     base.type_name()),
                                                    pos });
        };

        let row_index = self.eval(row, env)?.as_int(pos)?;
        let col_index = self.eval(col, env)?.as_int(pos)?;

        let len = rows.borrow().len();
        if row_index < 0 || row_index as usize >= len {
            return Err(RuntimeError::IndexOutOfBounds { index: row_index,
                                                        len,
                                                        pos });
        }
        if col_index < 0 {
            return Err(RuntimeError::IndexOutOfBounds { index: col_index,
                                                        len: 0,
                                                        pos });
        }

        let row_value = rows.borrow()[row_index as usize].clone();
        let Value::Array(cells) = row_value else {
            return Err(RuntimeError::DimensionMismatch { details: "expected a two-dimensional array".to_string(),
                                                         pos });
        };
        Ok((cells, col_index as usize))
    }

    /// Evaluates a call expression.
    ///
    /// The callee is resolved in the function namespace first, then the
    /// arguments evaluate left-to-right. A name bound only as a variable is
    /// not callable.
    fn eval_call(&mut self,
                 name: &str,
                 arguments: &[Expr],
                 env: &Rc<RefCell<Environment>>,
                 pos: Pos)
                 -> EvalResult<Value> {
        let callee = env.borrow().get_function(name);
        let callee = match callee {
            Some(value) => value,
            None if env.borrow().get_variable(name).is_some() => {
                return Err(RuntimeError::NotCallable { name: name.to_string(),
                                                       pos });
            },
            None => {
                return Err(RuntimeError::UnknownFunction { name: name.to_string(),
                                                           pos });
            },
        };

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.eval(argument, env)?);
        }

        match callee {
            Value::Function(func) => self.call_function(&func, args, pos),
            Value::Native(kind) => self.call_native(kind, &args, pos),
            _ => Err(RuntimeError::NotCallable { name: name.to_string(),
                                                 pos }),
        }
    }
}
