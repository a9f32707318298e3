//! Classes and instances.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::diagnostics::RuntimeError;
use crate::function::{Callable, Function};
use crate::interpreter::Interpreter;
use crate::object::Object;
use crate::signal::Signal;
use crate::token::Token;

pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<RefCell<Class>>>,
    pub methods: HashMap<String, Rc<Function>>,
}

impl Class {
    pub fn new(name: impl Into<String>, superclass: Option<Rc<RefCell<Class>>>, methods: HashMap<String, Rc<Function>>) -> Self {
        Class { name: name.into(), superclass, methods }
    }

    /// Walks the inheritance chain looking for `name`, starting at this
    /// class and falling back to each superclass in turn.
    pub fn find_method(&self, name: &str) -> Option<Rc<Function>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }
        self.superclass.as_ref().and_then(|superclass| superclass.borrow().find_method(name))
    }
}

impl Class {
    pub fn arity(&self) -> usize {
        self.find_method("init").map(|init| init.arity()).unwrap_or(0)
    }
}

/// Constructs a new instance of `class`, running its `init` method (if it
/// has one) against `arguments`. Kept as a free function rather than a
/// [`Callable`] impl because instantiation needs the class's own `Rc`
/// handle, not just a borrow of it, to stash into the new instance.
pub fn instantiate(class: &Rc<RefCell<Class>>, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Signal> {
    let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(class))));

    if let Some(init) = class.borrow().find_method("init") {
        init.bind(Rc::clone(&instance)).call(interpreter, arguments)?;
    }

    Ok(Object::Instance(instance))
}

pub struct Instance {
    pub class: Rc<RefCell<Class>>,
    fields: HashMap<String, Object>,
}

impl Instance {
    pub fn new(class: Rc<RefCell<Class>>) -> Self {
        Instance { class, fields: HashMap::new() }
    }

    pub fn get(this: &Rc<RefCell<Instance>>, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(value) = this.borrow().fields.get(&name.lexeme) {
            return Ok(value.clone());
        }

        let method = this.borrow().class.borrow().find_method(&name.lexeme);
        if let Some(method) = method {
            return Ok(Object::Function(Rc::new(method.bind(Rc::clone(this)))));
        }

        Err(RuntimeError::new(name.clone(), format!("Undefined property '{}'.", name.lexeme)))
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}
