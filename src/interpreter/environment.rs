use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{ast::Pos, error::RuntimeError, interpreter::value::core::Value};

/// One lexical scope in the environment chain.
///
/// Environments reference (never own) their parent, since several closures
/// may share one captured scope. Variables and functions live in disjoint
/// namespaces, so a variable may shadow nothing while sharing its name with
/// a function in an enclosing scope.
pub struct Environment {
    variables: HashMap<String, Value>,
    functions: HashMap<String, Value>,
    parent:    Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates the root (global) environment.
    #[must_use]
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { variables: HashMap::new(),
                                    functions: HashMap::new(),
                                    parent:    None, }))
    }

    /// Creates a child scope of `parent`.
    #[must_use]
    pub fn child(parent: &Rc<RefCell<Self>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { variables: HashMap::new(),
                                    functions: HashMap::new(),
                                    parent:    Some(Rc::clone(parent)), }))
    }

    /// Declares a variable in this scope.
    ///
    /// # Errors
    /// Returns `RuntimeError::Redeclaration` if the name already exists in
    /// this scope's variable or function namespace. Enclosing scopes are
    /// not consulted; shadowing across scopes is allowed.
    pub fn define_variable(&mut self, name: &str, value: Value, pos: Pos)
                           -> Result<(), RuntimeError> {
        if self.variables.contains_key(name) || self.functions.contains_key(name) {
            return Err(RuntimeError::Redeclaration { name: name.to_string(),
                                                     pos });
        }
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    /// Declares a function in this scope.
    ///
    /// # Errors
    /// Returns `RuntimeError::Redeclaration` under the same rule as
    /// [`Self::define_variable`].
    pub fn define_function(&mut self, name: &str, value: Value, pos: Pos)
                           -> Result<(), RuntimeError> {
        if self.variables.contains_key(name) || self.functions.contains_key(name) {
            return Err(RuntimeError::Redeclaration { name: name.to_string(),
                                                     pos });
        }
        self.functions.insert(name.to_string(), value);
        Ok(())
    }

    /// Seeds a native function into this scope, overwriting any previous
    /// entry. Only used while constructing the global environment.
    pub(crate) fn define_native(&mut self, name: &str, value: Value) {
        self.functions.insert(name.to_string(), value);
    }

    /// Looks up a variable, walking the parent chain.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.variables.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.borrow().get_variable(name))
    }

    /// Looks up a function, walking the parent chain.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.functions.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.borrow().get_function(name))
    }

    /// Assigns to the nearest enclosing scope that declared the variable.
    ///
    /// Never creates a new binding. Returns `false` when no scope in the
    /// chain declares the name.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.variables.get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_rejects_same_scope_redeclaration() {
        let env = Environment::new();
        env.borrow_mut().define_variable("x", Value::Int(1), Pos::default()).unwrap();
        let second = env.borrow_mut().define_variable("x", Value::Int(2), Pos::default());
        assert!(matches!(second, Err(RuntimeError::Redeclaration { .. })));
    }

    #[test]
    fn shadowing_across_scopes_is_allowed() {
        let global = Environment::new();
        global.borrow_mut().define_variable("x", Value::Int(1), Pos::default()).unwrap();

        let inner = Environment::child(&global);
        inner.borrow_mut().define_variable("x", Value::Int(2), Pos::default()).unwrap();
        assert_eq!(inner.borrow().get_variable("x"), Some(Value::Int(2)));
        assert_eq!(global.borrow().get_variable("x"), Some(Value::Int(1)));
    }

    #[test]
    fn assign_mutates_the_nearest_declaring_scope() {
        let global = Environment::new();
        global.borrow_mut().define_variable("x", Value::Int(1), Pos::default()).unwrap();

        let inner = Environment::child(&global);
        assert!(inner.borrow_mut().assign("x", Value::Int(5)));
        assert_eq!(global.borrow().get_variable("x"), Some(Value::Int(5)));
    }

    #[test]
    fn assign_never_creates_a_binding() {
        let env = Environment::new();
        assert!(!env.borrow_mut().assign("missing", Value::Int(1)));
        assert_eq!(env.borrow().get_variable("missing"), None);
    }

    #[test]
    fn variables_and_functions_are_disjoint_namespaces() {
        let global = Environment::new();
        global.borrow_mut().define_function("f", Value::Void, Pos::default()).unwrap();

        let inner = Environment::child(&global);
        inner.borrow_mut().define_variable("f", Value::Int(1), Pos::default()).unwrap();
        assert_eq!(inner.borrow().get_variable("f"), Some(Value::Int(1)));
        assert_eq!(inner.borrow().get_function("f"), Some(Value::Void));
    }
}
