//! Lexical scopes at runtime.
//!
//! An `Environment` is a `HashMap` plus an optional link to its enclosing
//! scope. Closures capture an `Rc<RefCell<Environment>>`, so a function
//! that outlives the block it was declared in keeps that block's scope
//! alive. `get_at`/`assign_at` walk a fixed number of `enclosing` links,
//! as computed by the resolver, rather than searching by name.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::diagnostics::RuntimeError;
use crate::object::Object;
use crate::token::Token;

pub struct Environment {
    enclosing: Option<Rc<RefCell<Environment>>>,
    values: HashMap<String, Object>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Environment { enclosing: None, values: HashMap::new() }))
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Environment { enclosing: Some(enclosing), values: HashMap::new() }))
    }

    /// `var` always succeeds, even re-declaring a name already in this
    /// scope; redeclaration is a resolver-time warning, not a runtime
    /// error.
    pub fn define(&mut self, name: impl Into<String>, value: Object) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }
        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }
        Err(RuntimeError::new(name.clone(), format!("Undefined variable '{}'.", name.lexeme)))
    }

    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }
        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }
        Err(RuntimeError::new(name.clone(), format!("Undefined variable '{}'.", name.lexeme)))
    }

    fn ancestor(env: &Rc<RefCell<Environment>>, distance: usize) -> Rc<RefCell<Environment>> {
        let mut current = Rc::clone(env);
        for _ in 0..distance {
            let next = current
                .borrow()
                .enclosing
                .clone()
                .expect("resolver-computed distance exceeds the actual scope chain");
            current = next;
        }
        current
    }

    pub fn get_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str) -> Object {
        Environment::ancestor(env, distance)
            .borrow()
            .values
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("resolver resolved '{name}' at a scope that does not define it"))
    }

    pub fn assign_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &Token, value: Object) {
        Environment::ancestor(env, distance).borrow_mut().values.insert(name.lexeme.clone(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    fn token(name: &str) -> Token {
        Token::synthetic(TokenType::Identifier, name)
    }

    #[test]
    fn define_then_get() {
        let env = Environment::new();
        env.borrow_mut().define("x", Object::from(1.0));
        assert_eq!(env.borrow().get(&token("x")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn get_falls_through_to_enclosing() {
        let outer = Environment::new();
        outer.borrow_mut().define("x", Object::from(1.0));
        let inner = Environment::with_enclosing(Rc::clone(&outer));
        assert_eq!(inner.borrow().get(&token("x")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn assign_to_undefined_variable_errors() {
        let env = Environment::new();
        assert!(env.borrow_mut().assign(&token("missing"), Object::from(1.0)).is_err());
    }

    #[test]
    fn get_at_distance_skips_shadowing_scope() {
        let outer = Environment::new();
        outer.borrow_mut().define("x", Object::from(1.0));
        let inner = Environment::with_enclosing(Rc::clone(&outer));
        inner.borrow_mut().define("x", Object::from(2.0));
        assert_eq!(Environment::get_at(&inner, 1, "x"), Object::from(1.0));
        assert_eq!(Environment::get_at(&inner, 0, "x"), Object::from(2.0));
    }
}
