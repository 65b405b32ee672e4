use std::rc::Rc;

use crate::{
    ast::Pos,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Interpreter},
            statement::Signal,
        },
        value::{core::Value, function::FunctionValue},
    },
};

impl Interpreter<'_> {
    /// Calls a user-defined function with already-evaluated arguments.
    ///
    /// The call scope is a child of the function's captured closure
    /// environment, not of the caller's, so free variables resolve
    /// lexically. Parameters are defined in that scope, the body executes,
    /// and a `Return` signal's payload becomes the call's result; falling
    /// off the end yields `Void`. The declared return type's voidness is
    /// checked against the produced value.
    ///
    /// # Errors
    /// Arity mismatches, return-contract violations, `break`/`continue`
    /// escaping the body, and any `RuntimeError` from the body itself.
    pub(crate) fn call_function(&mut self,
                                func: &Rc<FunctionValue>,
                                args: Vec<Value>,
                                pos: Pos)
                                -> EvalResult<Value> {
        let decl = &func.decl;
        if decl.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch { name:     decl.name.clone(),
                                                     expected: decl.params.len(),
                                                     found:    args.len(),
                                                     pos });
        }

        let scope = Environment::child(&func.env);
        for (param, arg) in decl.params.iter().zip(args) {
            scope.borrow_mut().define_variable(&param.name, arg, decl.pos)?;
        }

        let (value, ret_pos) = match self.execute_block(&decl.body, &scope)? {
            Signal::Return(value, ret_pos) => (value.unwrap_or(Value::Void), ret_pos),
            Signal::Break(pos) => return Err(RuntimeError::BreakOutsideLoop { pos }),
            Signal::Continue(pos) => return Err(RuntimeError::ContinueOutsideLoop { pos }),
            Signal::Normal => (Value::Void, decl.pos),
        };

        if decl.return_type.is_void() && !value.is_void() {
            return Err(RuntimeError::UnexpectedReturnValue { name: decl.name.clone(),
                                                             pos:  ret_pos, });
        }
        if !decl.return_type.is_void() && value.is_void() {
            return Err(RuntimeError::MissingReturnValue { name: decl.name.clone(),
                                                          pos });
        }
        Ok(value)
    }
}
