//! Static analysis pass run between parsing and interpretation.
//!
//! The resolver walks the AST once, maintaining a stack of lexical scopes
//! that mirrors the block structure the interpreter will later execute.
//! For every variable read and assignment it records how many scopes
//! outward the declaring scope sits, keyed by the expression node's
//! [`NodeId`] rather than by name — so two lexically distinct uses of the
//! same name never collide. It also catches several errors no earlier
//! pass can see: returning from top level, `this`/`super` outside a
//! method, a class inheriting from itself, and returning a value from
//! `init`.

use std::collections::HashMap;

use crate::diagnostics::{Diagnostics, ResolveError};
use crate::expr::*;
use crate::stmt::*;
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionKind {
    None,
    Function,
    Initializer,
    Method,
    Lambda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassKind {
    None,
    Class,
    Subclass,
}

/// Tracks, per scope, whether a binding has been declared (placeholder),
/// defined (initializer has run), and whether it has since been read —
/// the last of these backs the unused-variable warning.
struct Binding {
    token: Token,
    defined: bool,
    used: bool,
}

pub struct Resolver<'a> {
    diagnostics: &'a mut Diagnostics,
    scopes: Vec<HashMap<String, Binding>>,
    locals: HashMap<NodeId, usize>,
    current_function: FunctionKind,
    current_class: ClassKind,
}

impl<'a> Resolver<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics) -> Self {
        Resolver {
            diagnostics,
            scopes: Vec::new(),
            locals: HashMap::new(),
            current_function: FunctionKind::None,
            current_class: ClassKind::None,
        }
    }

    /// Resolves an entire program, returning the side table mapping every
    /// local-variable reference to its scope distance. References absent
    /// from the table are globals.
    pub fn resolve(mut self, statements: &[Stmt]) -> HashMap<NodeId, usize> {
        self.resolve_statements(statements);
        self.locals
    }

    fn resolve_statements(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            for (name, binding) in scope {
                if !binding.used && !name.starts_with('_') {
                    self.diagnostics.report_resolve_warning(&ResolveError {
                        token: binding.token,
                        message: format!("Local variable '{name}' is never used."),
                    });
                }
            }
        }
    }

    fn declare(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(&name.lexeme) {
                self.diagnostics.report_resolve(&ResolveError {
                    token: name.clone(),
                    message: format!("Already a variable named '{}' in this scope.", name.lexeme),
                });
            }
            scope.insert(name.lexeme.clone(), Binding { token: name.clone(), defined: false, used: false });
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            if let Some(binding) = scope.get_mut(&name.lexeme) {
                binding.defined = true;
            }
        }
    }

    /// Exempts a binding from the unused-variable warning. Used for
    /// function and class names: an unused local variable is a mistake
    /// worth flagging, but a nested function or class declared and never
    /// called isn't the same kind of smell.
    fn mark_used(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            if let Some(binding) = scope.get_mut(&name.lexeme) {
                binding.used = true;
            }
        }
    }

    fn resolve_local(&mut self, id: NodeId, name: &Token) {
        for (depth, scope) in self.scopes.iter_mut().rev().enumerate() {
            if let Some(binding) = scope.get_mut(&name.lexeme) {
                binding.used = true;
                self.locals.insert(id, depth);
                return;
            }
        }
        // Not found in any local scope: treat as a global.
    }

    fn resolve_function(&mut self, lambda: &LambdaData, kind: FunctionKind) {
        let enclosing_function = self.current_function;
        self.current_function = kind;

        self.begin_scope();
        for param in &lambda.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_statements(&lambda.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(data) => self.resolve_expr(&data.expression),
            Stmt::Print(data) => self.resolve_expr(&data.expression),
            Stmt::Var(data) => {
                self.declare(&data.name);
                if let Some(initializer) = &data.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&data.name);
            }
            Stmt::Block(data) => {
                self.begin_scope();
                self.resolve_statements(&data.statements);
                self.end_scope();
            }
            Stmt::If(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::While(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.body);
            }
            // Loop-context validity (break/continue outside a loop) is
            // caught earlier, by the parser's own loop-depth tracking;
            // neither carries a sub-expression to resolve.
            Stmt::Break(_) | Stmt::Continue(_) => {}
            Stmt::Function(data) => {
                self.declare(&data.name);
                self.define(&data.name);
                self.mark_used(&data.name);
                self.resolve_function(&data.lambda, FunctionKind::Function);
            }
            Stmt::Return(data) => {
                if self.current_function == FunctionKind::None {
                    self.diagnostics.report_resolve(&ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot return from top-level code.".to_string(),
                    });
                }
                if let Some(value) = &data.value {
                    if self.current_function == FunctionKind::Initializer {
                        self.diagnostics.report_resolve(&ResolveError {
                            token: data.keyword.clone(),
                            message: "Cannot return a value from an initializer.".to_string(),
                        });
                    }
                    self.resolve_expr(value);
                }
            }
            Stmt::Class(data) => self.resolve_class(data),
        }
    }

    fn resolve_class(&mut self, data: &ClassData) {
        let enclosing_class = self.current_class;
        self.current_class = ClassKind::Class;

        self.declare(&data.name);
        self.define(&data.name);
        self.mark_used(&data.name);

        if let Some(Expr::Variable(superclass)) = &data.superclass {
            if superclass.name.lexeme == data.name.lexeme {
                self.diagnostics.report_resolve(&ResolveError {
                    token: superclass.name.clone(),
                    message: "A class cannot inherit from itself.".to_string(),
                });
            }
            self.current_class = ClassKind::Subclass;
            self.resolve_expr(data.superclass.as_ref().unwrap());

            self.begin_scope();
            self.scopes.last_mut().unwrap().insert(
                "super".to_string(),
                Binding { token: superclass.name.clone(), defined: true, used: true },
            );
        }

        self.begin_scope();
        self.scopes
            .last_mut()
            .unwrap()
            .insert("this".to_string(), Binding { token: data.name.clone(), defined: true, used: true });

        for method in &data.methods {
            let kind = if method.name.lexeme == "init" { FunctionKind::Initializer } else { FunctionKind::Method };
            self.resolve_function(&method.lambda, kind);
        }

        self.end_scope();

        if data.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Variable(data) => {
                if let Some(scope) = self.scopes.last() {
                    if let Some(Binding { defined: false, .. }) = scope.get(&data.name.lexeme) {
                        self.diagnostics.report_resolve(&ResolveError {
                            token: data.name.clone(),
                            message: "Cannot read local variable in its own initializer.".to_string(),
                        });
                    }
                }
                self.resolve_local(data.id, &data.name);
            }
            Expr::Assign(data) => {
                self.resolve_expr(&data.value);
                self.resolve_local(data.id, &data.name);
            }
            Expr::Unary(data) => self.resolve_expr(&data.right),
            Expr::Binary(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            }
            Expr::Logical(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            }
            Expr::Grouping(data) => self.resolve_expr(&data.expression),
            Expr::Ternary(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_expr(&data.then_branch);
                self.resolve_expr(&data.else_branch);
            }
            Expr::Call(data) => {
                self.resolve_expr(&data.callee);
                for argument in &data.arguments {
                    self.resolve_expr(argument);
                }
            }
            Expr::Get(data) => self.resolve_expr(&data.object),
            Expr::Set(data) => {
                self.resolve_expr(&data.value);
                self.resolve_expr(&data.object);
            }
            Expr::This(data) => {
                if self.current_class == ClassKind::None {
                    self.diagnostics.report_resolve(&ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'this' outside of a class.".to_string(),
                    });
                    return;
                }
                self.resolve_local(data.id, &data.keyword);
            }
            Expr::Super(data) => {
                if self.current_class == ClassKind::None {
                    self.diagnostics.report_resolve(&ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'super' outside of a class.".to_string(),
                    });
                } else if self.current_class != ClassKind::Subclass {
                    self.diagnostics.report_resolve(&ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'super' in a class with no superclass.".to_string(),
                    });
                }
                self.resolve_local(data.id, &data.keyword);
            }
            Expr::Lambda(data) => self.resolve_function(data, FunctionKind::Lambda),
        }
    }
}
