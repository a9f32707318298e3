//! Tree-walking evaluator.
//!
//! Every statement-executing method returns `Result<(), Signal>` and every
//! expression-evaluating method returns `Result<Object, Signal>`; `?`
//! unwinds a `return`/`break`/`continue`/runtime error through whatever
//! statements enclose it. [`Interpreter::interpret`] is the only place
//! that catches a `Signal` rather than propagate it further.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::{self, Class, Instance};
use crate::diagnostics::{Diagnostics, RuntimeError};
use crate::environment::Environment;
use crate::expr::*;
use crate::function::{self, Callable, Function};
use crate::literal::Literal;
use crate::object::Object;
use crate::signal::Signal;
use crate::stmt::*;
use crate::token::{Token, TokenType};

pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<NodeId, usize>,
    output: Box<dyn Write>,
}

impl Interpreter {
    pub fn new(output: Box<dyn Write>) -> Self {
        let globals = Environment::new();
        for (name, native) in function::globals() {
            globals.borrow_mut().define(name, Object::NativeFunction(Rc::new(native)));
        }
        Interpreter { environment: Rc::clone(&globals), globals, locals: HashMap::new(), output }
    }

    /// Runs a fully parsed-and-resolved program, reporting at most one
    /// runtime error (the first one raised) through `diagnostics`.
    pub fn interpret(&mut self, statements: &[Stmt], locals: HashMap<NodeId, usize>, diagnostics: &mut Diagnostics) {
        self.locals = locals;
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(Signal::Error(error)) => {
                    diagnostics.report_runtime(&error);
                    break;
                }
                // A resolver bug letting a bare return/break/continue reach
                // top level; nothing meaningful to do but stop.
                Err(_) => break,
            }
        }
    }

    /// Writes a prompt to the same sink `print` uses, without a trailing
    /// newline. Used by the `input` native so prompts appear before the
    /// line they ask for.
    pub fn write_prompt(&mut self, text: &str) {
        let _ = write!(self.output, "{text}");
        let _ = self.output.flush();
    }

    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<(), Signal> {
        let previous = std::mem::replace(&mut self.environment, environment);
        let result = self.run_statements(statements);
        self.environment = previous;
        result
    }

    fn run_statements(&mut self, statements: &[Stmt]) -> Result<(), Signal> {
        for statement in statements {
            self.execute(statement)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Signal> {
        match stmt {
            Stmt::Expression(data) => {
                self.evaluate(&data.expression)?;
                Ok(())
            }
            Stmt::Print(data) => {
                let value = self.evaluate(&data.expression)?;
                let _ = writeln!(self.output, "{value}");
                Ok(())
            }
            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::Literal(Literal::Nil),
                };
                self.environment.borrow_mut().define(data.name.lexeme.clone(), value);
                Ok(())
            }
            Stmt::Block(data) => {
                let scope = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(&data.statements, scope)
            }
            Stmt::If(data) => {
                if self.evaluate(&data.condition)?.is_truthy() {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While(data) => self.execute_while(data),
            Stmt::Break(_) => Err(Signal::Break),
            Stmt::Continue(data) => Err(Signal::Continue(data.loop_kind)),
            Stmt::Function(data) => {
                let function = Function::new(
                    data.name.lexeme.clone(),
                    data.lambda.params.clone(),
                    Rc::clone(&data.lambda.body),
                    Rc::clone(&self.environment),
                    false,
                );
                self.environment.borrow_mut().define(data.name.lexeme.clone(), Object::Function(Rc::new(function)));
                Ok(())
            }
            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::Literal(Literal::Nil),
                };
                Err(Signal::Return(value))
            }
            Stmt::Class(data) => self.execute_class(data),
        }
    }

    fn execute_while(&mut self, data: &WhileData) -> Result<(), Signal> {
        while self.evaluate(&data.condition)?.is_truthy() {
            match self.execute(&data.body) {
                Ok(()) => {}
                Err(Signal::Break) => break,
                // A `continue` unwinds past the rest of the body, which
                // for a desugared `for` loop includes the appended
                // increment statement (see parser.rs's for_statement). Run
                // the increment explicitly so `for` semantics hold: the
                // increment always executes before the next condition
                // check, `continue` or not. A plain `while` has no
                // increment and needs no extra step.
                Err(Signal::Continue(_)) => {
                    if let Some(increment) = &data.increment {
                        self.evaluate_in_child_scope(increment)?;
                    }
                    continue;
                }
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// Evaluates `expr` inside a fresh environment one scope deeper than
    /// the current one. Used for a `for` loop's increment clause, which
    /// the resolver resolves assuming it sits one level inside the body
    /// block it was appended to (see [`stmt::WhileData::increment`]).
    fn evaluate_in_child_scope(&mut self, expr: &Expr) -> Result<Object, Signal> {
        let scope = Environment::with_enclosing(Rc::clone(&self.environment));
        let previous = std::mem::replace(&mut self.environment, scope);
        let result = self.evaluate(expr);
        self.environment = previous;
        result
    }

    fn execute_class(&mut self, data: &ClassData) -> Result<(), Signal> {
        let superclass = match &data.superclass {
            Some(expr) => {
                let value = self.evaluate(expr)?;
                match value {
                    Object::Class(class) => Some(class),
                    _ => {
                        let token = match expr {
                            Expr::Variable(v) => v.name.clone(),
                            _ => data.name.clone(),
                        };
                        return Err(RuntimeError::new(token, "Superclass must be a class.".to_string()).into());
                    }
                }
            }
            None => None,
        };

        self.environment.borrow_mut().define(data.name.lexeme.clone(), Object::Literal(Literal::Nil));

        let method_environment = if let Some(superclass) = &superclass {
            let scope = Environment::with_enclosing(Rc::clone(&self.environment));
            scope.borrow_mut().define("super", Object::Class(Rc::clone(superclass)));
            scope
        } else {
            Rc::clone(&self.environment)
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let function = Function::new(
                method.name.lexeme.clone(),
                method.lambda.params.clone(),
                Rc::clone(&method.lambda.body),
                Rc::clone(&method_environment),
                method.name.lexeme == "init",
            );
            methods.insert(method.name.lexeme.clone(), Rc::new(function));
        }

        let class = Rc::new(RefCell::new(Class::new(data.name.lexeme.clone(), superclass, methods)));
        self.environment.borrow_mut().assign(&data.name, Object::Class(class))?;
        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, Signal> {
        match expr {
            Expr::Literal(literal) => Ok(Object::Literal(literal.clone())),
            Expr::Grouping(data) => self.evaluate(&data.expression),
            Expr::Variable(data) => Ok(self.lookup_variable(&data.name, data.id)?),
            Expr::Assign(data) => self.evaluate_assign(data),
            Expr::Unary(data) => self.evaluate_unary(data),
            Expr::Binary(data) => self.evaluate_binary(data),
            Expr::Logical(data) => self.evaluate_logical(data),
            Expr::Ternary(data) => {
                if self.evaluate(&data.condition)?.is_truthy() {
                    self.evaluate(&data.then_branch)
                } else {
                    self.evaluate(&data.else_branch)
                }
            }
            Expr::Call(data) => self.evaluate_call(data),
            Expr::Get(data) => self.evaluate_get(data),
            Expr::Set(data) => self.evaluate_set(data),
            Expr::This(data) => Ok(self.lookup_variable(&data.keyword, data.id)?),
            Expr::Super(data) => self.evaluate_super(data),
            Expr::Lambda(data) => Ok(Object::Function(Rc::new(Function::new(
                "<lambda>",
                data.params.clone(),
                Rc::clone(&data.body),
                Rc::clone(&self.environment),
                false,
            )))),
        }
    }

    fn lookup_variable(&self, name: &Token, id: NodeId) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(&distance) => Ok(Environment::get_at(&self.environment, distance, &name.lexeme)),
            None => self.globals.borrow().get(name),
        }
    }

    fn evaluate_assign(&mut self, data: &AssignData) -> Result<Object, Signal> {
        let value = self.evaluate(&data.value)?;
        match self.locals.get(&data.id) {
            Some(&distance) => Environment::assign_at(&self.environment, distance, &data.name, value.clone()),
            None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
        }
        Ok(value)
    }

    fn evaluate_unary(&mut self, data: &UnaryData) -> Result<Object, Signal> {
        let right = self.evaluate(&data.right)?;
        match data.operator.kind {
            TokenType::Minus => Ok(Object::from(-check_number_operand(&data.operator, &right)?)),
            TokenType::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!("parser never produces a unary node with this operator"),
        }
    }

    fn evaluate_logical(&mut self, data: &LogicalData) -> Result<Object, Signal> {
        let left = self.evaluate(&data.left)?;
        match data.operator.kind {
            TokenType::Or if left.is_truthy() => Ok(left),
            TokenType::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&data.right),
        }
    }

    fn evaluate_binary(&mut self, data: &BinaryData) -> Result<Object, Signal> {
        if data.operator.kind == TokenType::Comma {
            self.evaluate(&data.left)?;
            return self.evaluate(&data.right);
        }

        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;
        let op = &data.operator;

        match op.kind {
            TokenType::Minus => Ok(Object::from(check_number_operand(op, &left)? - check_number_operand(op, &right)?)),
            TokenType::Slash => {
                let divisor = check_number_operand(op, &right)?;
                if divisor == 0.0 {
                    return Err(RuntimeError::new(op.clone(), "Division by zero.".to_string()).into());
                }
                Ok(Object::from(check_number_operand(op, &left)? / divisor))
            }
            TokenType::Star => Ok(Object::from(check_number_operand(op, &left)? * check_number_operand(op, &right)?)),
            TokenType::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(a)), Object::Literal(Literal::Number(b))) => Ok(Object::from(a + b)),
                (Object::Literal(Literal::String(a)), Object::Literal(Literal::String(b))) => {
                    Ok(Object::from(format!("{a}{b}")))
                }
                _ => Err(RuntimeError::new(op.clone(), "Operands must be two numbers or two strings.".to_string()).into()),
            },
            TokenType::Greater | TokenType::GreaterEqual | TokenType::Less | TokenType::LessEqual => {
                Ok(compare(op.kind, &left, &right, op)?)
            }
            TokenType::BangEqual => Ok(Object::from(left != right)),
            TokenType::EqualEqual => Ok(Object::from(left == right)),
            _ => unreachable!("parser never produces a binary node with this operator"),
        }
    }

    fn evaluate_call(&mut self, data: &CallData) -> Result<Object, Signal> {
        let callee = self.evaluate(&data.callee)?;
        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let arity = match &callee {
            Object::Function(f) => f.arity(),
            Object::NativeFunction(f) => f.arity(),
            Object::Class(c) => c.borrow().arity(),
            _ => {
                return Err(RuntimeError::new(data.paren.clone(), "Can only call functions and classes.".to_string()).into());
            }
        };

        if arguments.len() != arity {
            return Err(RuntimeError::new(
                data.paren.clone(),
                format!("Expected {arity} arguments but got {}.", arguments.len()),
            )
            .into());
        }

        match callee {
            Object::Function(f) => f.call(self, arguments),
            Object::NativeFunction(f) => f.call(self, arguments),
            Object::Class(c) => class::instantiate(&c, self, arguments),
            _ => unreachable!("non-callable objects are rejected above"),
        }
    }

    fn evaluate_get(&mut self, data: &GetData) -> Result<Object, Signal> {
        let object = self.evaluate(&data.object)?;
        match object {
            Object::Instance(instance) => Ok(Instance::get(&instance, &data.name)?),
            _ => Err(RuntimeError::new(data.name.clone(), "Only instances have properties.".to_string()).into()),
        }
    }

    fn evaluate_set(&mut self, data: &SetData) -> Result<Object, Signal> {
        let object = self.evaluate(&data.object)?;
        let instance = match object {
            Object::Instance(instance) => instance,
            _ => return Err(RuntimeError::new(data.name.clone(), "Only instances have fields.".to_string()).into()),
        };
        let value = self.evaluate(&data.value)?;
        instance.borrow_mut().set(&data.name, value.clone());
        Ok(value)
    }

    fn evaluate_super(&mut self, data: &SuperData) -> Result<Object, Signal> {
        let distance = *self
            .locals
            .get(&data.id)
            .expect("resolver always resolves a well-formed 'super' expression");

        let superclass = match Environment::get_at(&self.environment, distance, "super") {
            Object::Class(class) => class,
            _ => unreachable!("'super' always resolves to a class"),
        };
        let instance = match Environment::get_at(&self.environment, distance - 1, "this") {
            Object::Instance(instance) => instance,
            _ => unreachable!("'this' always resolves to an instance one scope inside 'super'"),
        };

        match superclass.borrow().find_method(&data.method.lexeme) {
            Some(method) => Ok(Object::Function(Rc::new(method.bind(instance)))),
            None => Err(RuntimeError::new(data.method.clone(), format!("Undefined property '{}'.", data.method.lexeme)).into()),
        }
    }
}

fn check_number_operand(operator: &Token, operand: &Object) -> Result<f64, RuntimeError> {
    match operand {
        Object::Literal(Literal::Number(n)) => Ok(*n),
        _ => Err(RuntimeError::new(operator.clone(), format!("Operand must be a number, got {}.", operand.type_name()))),
    }
}

/// Orders two values for `< <= > >=`. Same-typed numbers and strings use
/// their natural ordering; a `nil` compared against anything non-`nil` is
/// treated as strictly least, symmetrically in both directions. Any other
/// pairing (mixed non-nil types, booleans, callables) is a type error.
fn compare(kind: TokenType, left: &Object, right: &Object, operator: &Token) -> Result<Object, RuntimeError> {
    use std::cmp::Ordering;

    let ordering = match (left, right) {
        (Object::Literal(Literal::Number(a)), Object::Literal(Literal::Number(b))) => a.partial_cmp(b),
        (Object::Literal(Literal::String(a)), Object::Literal(Literal::String(b))) => Some(a.cmp(b)),
        (Object::Literal(Literal::Nil), Object::Literal(Literal::Nil)) => Some(Ordering::Equal),
        (Object::Literal(Literal::Nil), _) => Some(Ordering::Less),
        (_, Object::Literal(Literal::Nil)) => Some(Ordering::Greater),
        _ => None,
    };

    let ordering = ordering.ok_or_else(|| {
        RuntimeError::new(operator.clone(), "Operands must be two numbers, two strings, or nil.".to_string())
    })?;

    let result = match kind {
        TokenType::Greater => ordering == Ordering::Greater,
        TokenType::GreaterEqual => ordering != Ordering::Less,
        TokenType::Less => ordering == Ordering::Less,
        TokenType::LessEqual => ordering != Ordering::Greater,
        _ => unreachable!("compare is only called for relational operators"),
    };

    Ok(Object::from(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use crate::scanner::Scanner;

    fn run_captured(source: &str) -> (String, bool) {
        use std::cell::RefCell as Cell;
        use std::rc::Rc as R;

        struct SharedBuf(R<Cell<Vec<u8>>>);
        impl Write for SharedBuf {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.borrow_mut().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buffer = R::new(Cell::new(Vec::new()));
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        let statements = Parser::new(tokens, &mut diagnostics).parse();
        let locals = Resolver::new(&mut diagnostics).resolve(&statements);

        let mut interpreter = Interpreter::new(Box::new(SharedBuf(R::clone(&buffer))));
        interpreter.interpret(&statements, locals, &mut diagnostics);

        let text = String::from_utf8(buffer.borrow().clone()).unwrap();
        (text, diagnostics.had_error() || diagnostics.had_runtime_error())
    }

    #[test]
    fn arithmetic_and_print() {
        let (output, had_error) = run_captured("print 1 + 2 * 3;");
        assert!(!had_error);
        assert_eq!(output, "7\n");
    }

    #[test]
    fn string_concatenation() {
        let (output, _) = run_captured("print \"a\" + \"b\";");
        assert_eq!(output, "ab\n");
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let (output, had_error) = run_captured(
            "fun makeCounter() { var i = 0; fun counter() { i = i + 1; print i; } return counter; } \
             var counter = makeCounter(); counter(); counter();",
        );
        assert!(!had_error);
        assert_eq!(output, "1\n2\n");
    }

    #[test]
    fn classes_and_inheritance() {
        let (output, had_error) = run_captured(
            "class Animal { speak() { print \"...\"; } } \
             class Dog < Animal { speak() { print \"Woof\"; super.speak(); } } \
             var d = Dog(); d.speak();",
        );
        assert!(!had_error);
        assert_eq!(output, "Woof\n...\n");
    }

    #[test]
    fn break_exits_innermost_loop() {
        let (output, had_error) = run_captured("for (var i = 0; i < 5; i = i + 1) { if (i == 2) break; print i; }");
        assert!(!had_error);
        assert_eq!(output, "0\n1\n");
    }

    #[test]
    fn continue_in_for_loop_still_runs_increment() {
        let (output, had_error) =
            run_captured("for (var i = 0; i < 5; i = i + 1) { if (i == 2) continue; print i; }");
        assert!(!had_error);
        assert_eq!(output, "0\n1\n3\n4\n");
    }

    #[test]
    fn ternary_and_comma_operators() {
        let (output, had_error) = run_captured("print (1 < 2 ? \"yes\" : \"no\"), 1 + 1;");
        assert!(!had_error);
        assert_eq!(output, "2\n");
    }

    #[test]
    fn undefined_variable_is_a_runtime_error() {
        let (_, had_error) = run_captured("print nope;");
        assert!(had_error);
    }

    #[test]
    fn adding_number_and_string_is_a_runtime_error() {
        let (_, had_error) = run_captured("print 1 + \"a\";");
        assert!(had_error);
    }

    #[test]
    fn string_comparison_is_lexicographic() {
        let (output, had_error) = run_captured("print \"a\" < \"b\";");
        assert!(!had_error);
        assert_eq!(output, "true\n");
    }

    #[test]
    fn nil_compares_as_strictly_least() {
        let (output, had_error) = run_captured("print nil < 1; print nil > 1; print 1 >= nil;");
        assert!(!had_error);
        assert_eq!(output, "true\nfalse\ntrue\n");
    }

    #[test]
    fn divide_by_zero_is_a_runtime_error() {
        let (_, had_error) = run_captured("print 1 / 0;");
        assert!(had_error);
    }

    #[test]
    fn initializer_with_naked_return_still_yields_instance() {
        let (output, had_error) =
            run_captured("class Box { init() { this.value = 42; return; } } print Box().value;");
        assert!(!had_error);
        assert_eq!(output, "42\n");
    }

    #[test]
    fn instance_display_matches_angle_bracket_form() {
        let (output, had_error) = run_captured("class Point {} print Point();");
        assert!(!had_error);
        assert_eq!(output, "<Point> instance\n");
    }
}
