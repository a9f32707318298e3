//! Callable values: user-defined functions/methods/lambdas and the handful
//! of natives seeded into the global scope.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::class::Instance;
use crate::diagnostics::RuntimeError;
use crate::environment::Environment;
use crate::interpreter::Interpreter;
use crate::object::Object;
use crate::signal::Signal;
use crate::stmt::Stmt;
use crate::token::{Token, TokenType};

pub trait Callable {
    fn arity(&self) -> usize;
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Signal>;
    fn name(&self) -> &str;
}

/// A user-defined function, method or lambda. `name` is `"<lambda>"` for
/// lambdas, which have no declaration to name them after.
pub struct Function {
    pub name: String,
    params: Vec<Token>,
    body: Rc<Vec<Stmt>>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Token>,
        body: Rc<Vec<Stmt>>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Function { name: name.into(), params, body, closure, is_initializer }
    }

    /// Produces a copy of this function whose closure additionally binds
    /// `this` to `instance`. Used once per method lookup, so each bound
    /// method has its own `this` without mutating the class's shared
    /// unbound method.
    pub fn bind(&self, instance: Rc<RefCell<Instance>>) -> Function {
        let environment = Environment::with_enclosing(Rc::clone(&self.closure));
        environment.borrow_mut().define("this", Object::Instance(instance));
        Function {
            name: self.name.clone(),
            params: self.params.clone(),
            body: Rc::clone(&self.body),
            closure: environment,
            is_initializer: self.is_initializer,
        }
    }
}

impl Callable for Function {
    fn arity(&self) -> usize {
        self.params.len()
    }

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Signal> {
        let environment = Environment::with_enclosing(Rc::clone(&self.closure));
        for (param, argument) in self.params.iter().zip(arguments) {
            environment.borrow_mut().define(param.lexeme.clone(), argument);
        }

        let result = interpreter.execute_block(&self.body, environment);

        match result {
            Ok(()) | Err(Signal::Return(_)) if self.is_initializer => {
                let this = self.closure.borrow().get(&Token::synthetic(TokenType::This, "this"));
                Ok(this.expect("a bound initializer's closure always defines 'this'"))
            }
            Ok(()) => Ok(Object::Literal(crate::literal::Literal::Nil)),
            Err(Signal::Return(value)) => Ok(value),
            Err(other) => Err(other),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

type NativeFn = dyn Fn(&[Object]) -> Result<Object, RuntimeError>;

pub struct NativeFunction {
    pub name: String,
    arity: usize,
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new(name: impl Into<String>, arity: usize, func: impl Fn(&[Object]) -> Result<Object, RuntimeError> + 'static) -> Self {
        NativeFunction { name: name.into(), arity, func: Box::new(func) }
    }
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Signal> {
        if self.name == "input" {
            interpreter.write_prompt(&arguments[0].to_string());
        }
        (self.func)(&arguments).map_err(Signal::Error)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Builds the native functions seeded into the global scope at startup:
/// `clock` (milliseconds since the Unix epoch, as a float), `stringify`
/// (the textual representation a `print` statement would produce for any
/// value), and `input` (prints its argument as a prompt, then reads one
/// line from stdin, without its trailing newline, as a string; empty
/// string at EOF).
pub fn globals() -> Vec<(&'static str, NativeFunction)> {
    vec![
        (
            "clock",
            NativeFunction::new("clock", 0, |_| {
                let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
                Ok(Object::from(now.as_millis() as f64))
            }),
        ),
        (
            "stringify",
            NativeFunction::new("stringify", 1, |args| Ok(Object::from(args[0].to_string()))),
        ),
        (
            "input",
            NativeFunction::new("input", 1, |_| {
                let mut line = String::new();
                std::io::stdin()
                    .read_line(&mut line)
                    .map_err(|e| RuntimeError::new(Token::synthetic(TokenType::Identifier, "input"), e.to_string()))?;
                Ok(Object::from(line.trim_end_matches(['\n', '\r']).to_string()))
            }),
        ),
    ]
}
