use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{Block, Pos, Stmt},
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, function::FunctionValue},
    },
};

/// The outcome of executing one statement.
///
/// Control flow is propagated as an explicit result rather than by
/// unwinding: every statement executor returns a `Signal`, block execution
/// stops on the first non-`Normal` one, loops absorb `Break`/`Continue`,
/// and the function-call protocol absorbs `Return`. A signal that reaches
/// a context that cannot absorb it becomes a runtime error there, carrying
/// the position the signal was raised at.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// The statement completed; continue with the next one.
    Normal,
    /// A `break` is looking for its enclosing loop.
    Break(Pos),
    /// A `continue` is looking for its enclosing loop.
    Continue(Pos),
    /// A `return` is looking for its enclosing function call.
    Return(Option<Value>, Pos),
}

impl Interpreter<'_> {
    /// Executes a single statement.
    ///
    /// # Errors
    /// Any `RuntimeError` raised by the statement or an expression in it.
    pub fn execute(&mut self,
                   stmt: &Stmt,
                   env: &Rc<RefCell<Environment>>)
                   -> EvalResult<Signal> {
        match stmt {
            Stmt::Declaration { name, init, pos, .. } => {
                let value = self.eval(init, env)?;
                env.borrow_mut().define_variable(name, value, *pos)?;
                Ok(Signal::Normal)
            },
            Stmt::Expression { expr, .. } => {
                self.eval(expr, env)?;
                Ok(Signal::Normal)
            },
            Stmt::If { branches, else_body, .. } => {
                for branch in branches {
                    if self.eval(&branch.condition, env)?.truthy() {
                        return self.execute_block(&branch.body, env);
                    }
                }
                match else_body {
                    Some(body) => self.execute_block(body, env),
                    None => Ok(Signal::Normal),
                }
            },
            Stmt::While { condition, body, .. } => {
                while self.eval(condition, env)?.truthy() {
                    match self.execute_block(body, env)? {
                        Signal::Normal | Signal::Continue(_) => {},
                        Signal::Break(_) => break,
                        ret @ Signal::Return(..) => return Ok(ret),
                    }
                }
                Ok(Signal::Normal)
            },
            Stmt::For { init, condition, post, body, .. } => {
                // The header expressions evaluate in the surrounding scope;
                // only the body opens a new one.
                if let Some(init) = init {
                    self.eval(init, env)?;
                }
                loop {
                    if let Some(condition) = condition
                       && !self.eval(condition, env)?.truthy()
                    {
                        break;
                    }
                    match self.execute_block(body, env)? {
                        // The post expression still runs after a continue.
                        Signal::Normal | Signal::Continue(_) => {},
                        Signal::Break(_) => break,
                        ret @ Signal::Return(..) => return Ok(ret),
                    }
                    if let Some(post) = post {
                        self.eval(post, env)?;
                    }
                }
                Ok(Signal::Normal)
            },
            Stmt::Return { value, pos } => {
                let value = match value {
                    Some(expr) => Some(self.eval(expr, env)?),
                    None => None,
                };
                Ok(Signal::Return(value, *pos))
            },
            Stmt::Break { pos } => Ok(Signal::Break(*pos)),
            Stmt::Continue { pos } => Ok(Signal::Continue(*pos)),
            Stmt::Function(decl) => {
                let func = FunctionValue { decl: Rc::new(decl.clone()),
                                           env:  Rc::clone(env), };
                env.borrow_mut().define_function(&decl.name,
                                                 Value::Function(Rc::new(func)),
                                                 decl.pos)?;
                Ok(Signal::Normal)
            },
        }
    }

    /// Executes a block in a fresh child scope.
    ///
    /// Declarations inside the block are invisible once it finishes. The
    /// first non-`Normal` signal stops the block and is handed upward.
    ///
    /// # Errors
    /// Any `RuntimeError` raised by a statement in the block.
    pub fn execute_block(&mut self,
                         block: &Block,
                         env: &Rc<RefCell<Environment>>)
                         -> EvalResult<Signal> {
        let scope = Environment::child(env);
        for stmt in &block.statements {
            match self.execute(stmt, &scope)? {
                Signal::Normal => {},
                signal => return Ok(signal),
            }
        }
        Ok(Signal::Normal)
    }
}
