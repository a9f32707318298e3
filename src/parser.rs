//! Recursive-descent parser turning a token stream into a statement list.
//!
//! ```text
//! program     → declaration* EOF ;
//! declaration → classDecl | funDecl | varDecl | statement ;
//! classDecl   → "class" IDENTIFIER ( "<" IDENTIFIER )? "{" function* "}" ;
//! funDecl     → "fun" function ;
//! function    → IDENTIFIER "(" parameters? ")" block ;
//! parameters  → IDENTIFIER ( "," IDENTIFIER )* ;
//! varDecl     → "var" IDENTIFIER ( "=" expression )? ";" ;
//! statement   → exprStmt | forStmt | ifStmt | printStmt | returnStmt
//!             | whileStmt | breakStmt | continueStmt | block ;
//! exprStmt    → expression ";" ;
//! forStmt     → "for" "(" ( varDecl | exprStmt | ";" )
//!               expression? ";" expression? ")" statement ;
//! ifStmt      → "if" "(" expression ")" statement ( "else" statement )? ;
//! printStmt   → "print" expression ";" ;
//! returnStmt  → "return" expression? ";" ;
//! breakStmt   → "break" ";" ;
//! continueStmt→ "continue" ";" ;
//! whileStmt   → "while" "(" expression ")" statement ;
//! block       → "{" declaration* "}" ;
//! expression  → comma ;
//! comma       → assignment ( "," assignment )* ;
//! assignment  → ( call "." )? IDENTIFIER "=" assignment | ternary ;
//! ternary     → logic_or ( "?" expression ":" ternary )? ;
//! logic_or    → logic_and ( "or" logic_and )* ;
//! logic_and   → equality ( "and" equality )* ;
//! equality    → comparison ( ( "!=" | "==" ) comparison )* ;
//! comparison  → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
//! term        → factor ( ( "-" | "+" ) factor )* ;
//! factor      → unary ( ( "/" | "*" ) unary )* ;
//! unary       → ( "!" | "-" ) unary | call ;
//! call        → primary ( "(" arguments? ")" | "." IDENTIFIER )* ;
//! arguments   → assignment ( "," assignment )* ;
//! lambda      → "fun" "(" parameters? ")" block ;
//! primary     → "true" | "false" | "nil" | NUMBER | STRING
//!             | "(" expression ")" | IDENTIFIER
//!             | "this" | "super" "." IDENTIFIER | lambda ;
//! ```
//!
//! `comma` sits above `assignment` so top-level expression statements allow
//! the comma operator, while call arguments parse at `assignment` so a
//! bare `,` inside `f(a, b)` separates arguments instead of chaining a
//! comma expression.

use std::rc::Rc;

use crate::diagnostics::{Diagnostics, ParseError};
use crate::expr::*;
use crate::stmt::*;
use crate::token::{Token, TokenType};

const MAX_ARGS: usize = 255;

pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    diagnostics: &'a mut Diagnostics,
    loop_stack: Vec<LoopKind>,
    repl_mode: bool,
}

/// Raised internally to unwind out of an in-progress production once an
/// error has been reported; caught at statement boundaries by
/// [`Parser::synchronize`].
struct Bailout;

type ParseResult<T> = Result<T, Bailout>;

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, diagnostics: &'a mut Diagnostics) -> Self {
        Parser { tokens, current: 0, diagnostics, loop_stack: Vec::new(), repl_mode: false }
    }

    /// Parses a complete program, recovering from errors at statement
    /// boundaries so one bad line doesn't hide every other diagnostic.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Ok(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        statements
    }

    /// Parses one REPL line. The first top-level statement may be a bare
    /// expression with no trailing semicolon, accepted as an ordinary
    /// `Expression` statement as long as it runs straight into `Eof`; the
    /// relaxation self-clears the moment that first statement is consumed,
    /// so it never applies to a second statement on the same line.
    pub fn parse_repl_line(&mut self) -> Vec<Stmt> {
        self.repl_mode = true;
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Ok(stmt) = self.declaration() {
                statements.push(stmt);
            }
            self.repl_mode = false;
        }
        statements
    }

    fn declaration(&mut self) -> ParseResult<Stmt> {
        let result = if self.matches(&[TokenType::Class]) {
            self.class_declaration()
        } else if self.matches(&[TokenType::Fun]) && self.check(TokenType::Identifier) {
            self.function("function")
        } else if self.matches(&[TokenType::Var]) {
            self.var_declaration()
        } else {
            self.statement()
        };

        result.map_err(|bailout| {
            self.synchronize();
            bailout
        })
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenType::Identifier, "Expect class name.")?;

        let superclass = if self.matches(&[TokenType::Less]) {
            let superclass_name = self.consume(TokenType::Identifier, "Expect superclass name.")?;
            Some(Expr::Variable(VariableData { id: NodeId::fresh(), name: superclass_name }))
        } else {
            None
        };

        self.consume(TokenType::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(TokenType::RightBrace) && !self.is_at_end() {
            match self.function("method")? {
                Stmt::Function(data) => methods.push(data),
                _ => unreachable!("function() always returns Stmt::Function"),
            }
        }

        self.consume(TokenType::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class(ClassData { name, superclass, methods }))
    }

    fn function(&mut self, kind: &str) -> ParseResult<Stmt> {
        let name = self.consume(TokenType::Identifier, &format!("Expect {kind} name."))?;
        let lambda = self.lambda_body(kind)?;
        Ok(Stmt::Function(FunctionData { name, lambda: Rc::new(lambda) }))
    }

    fn lambda_body(&mut self, kind: &str) -> ParseResult<LambdaData> {
        self.consume(TokenType::LeftParen, &format!("Expect '(' after {kind} name."))?;
        let mut params = Vec::new();
        if !self.check(TokenType::RightParen) {
            loop {
                if params.len() >= MAX_ARGS {
                    self.error(self.peek().clone(), &format!("Can't have more than {MAX_ARGS} parameters."));
                }
                params.push(self.consume(TokenType::Identifier, "Expect parameter name.")?);
                if !self.matches(&[TokenType::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenType::RightParen, "Expect ')' after parameters.")?;

        self.consume(TokenType::LeftBrace, &format!("Expect '{{' before {kind} body."))?;
        let body = self.block()?;

        Ok(LambdaData { params, body: Rc::new(body) })
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenType::Identifier, "Expect variable name.")?;
        let initializer = if self.matches(&[TokenType::Equal]) { Some(self.expression()?) } else { None };
        self.consume(TokenType::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if self.matches(&[TokenType::For]) {
            return self.for_statement();
        }
        if self.matches(&[TokenType::If]) {
            return self.if_statement();
        }
        if self.matches(&[TokenType::Print]) {
            return self.print_statement();
        }
        if self.matches(&[TokenType::Return]) {
            return self.return_statement();
        }
        if self.matches(&[TokenType::While]) {
            return self.while_statement();
        }
        if self.matches(&[TokenType::Break]) {
            return self.break_statement();
        }
        if self.matches(&[TokenType::Continue]) {
            return self.continue_statement();
        }
        if self.matches(&[TokenType::LeftBrace]) {
            return Ok(Stmt::Block(BlockData { statements: self.block()? }));
        }
        self.expression_statement()
    }

    /// Desugars `for (init; cond; incr) body` into:
    /// `{ init; while (cond) { body; incr; } }`, tagging the body's
    /// loop-context as [`LoopKind::For`] so a `continue` inside it still
    /// runs `incr` before re-checking `cond`. A copy of `incr` is also kept
    /// on the `While` node itself (see [`WhileData::increment`]) so the
    /// interpreter can re-run just the increment on `continue` without
    /// re-running the statements that precede it in the block.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.matches(&[TokenType::Semicolon]) {
            None
        } else if self.matches(&[TokenType::Var]) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(TokenType::Semicolon) { Some(self.expression()?) } else { None };
        self.consume(TokenType::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(TokenType::RightParen) { Some(self.expression()?) } else { None };
        self.consume(TokenType::RightParen, "Expect ')' after for clauses.")?;

        self.loop_stack.push(LoopKind::For);
        let mut body = self.statement()?;
        self.loop_stack.pop();

        if let Some(increment) = &increment {
            body = Stmt::Block(BlockData {
                statements: vec![body, Stmt::Expression(ExpressionData { expression: increment.clone() })],
            });
        }

        let condition = condition.unwrap_or(Expr::Literal(crate::literal::Literal::Bool(true)));
        body = Stmt::While(WhileData { condition, body: Box::new(body), increment });

        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData { statements: vec![initializer, body] });
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenType::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.matches(&[TokenType::Else]) { Some(Box::new(self.statement()?)) } else { None };

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expression = self.expression()?;
        self.consume(TokenType::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(PrintData { expression }))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();
        let value = if !self.check(TokenType::Semicolon) { Some(self.expression()?) } else { None };
        self.consume(TokenType::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenType::RightParen, "Expect ')' after condition.")?;

        self.loop_stack.push(LoopKind::While);
        let body = Box::new(self.statement()?);
        self.loop_stack.pop();

        Ok(Stmt::While(WhileData { condition, body, increment: None }))
    }

    fn break_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();
        if self.loop_stack.is_empty() {
            self.error(keyword.clone(), "Cannot use 'break' outside of a loop.");
        }
        self.consume(TokenType::Semicolon, "Expect ';' after 'break'.")?;
        Ok(Stmt::Break(BreakData { keyword }))
    }

    fn continue_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();
        if self.loop_stack.is_empty() {
            self.error(keyword.clone(), "Cannot use 'continue' outside of a loop.");
        }
        self.consume(TokenType::Semicolon, "Expect ';' after 'continue'.")?;
        let loop_kind = self.loop_stack.last().copied().unwrap_or(LoopKind::While);
        Ok(Stmt::Continue(ContinueData { keyword, loop_kind }))
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.check(TokenType::RightBrace) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }
        self.consume(TokenType::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expression = self.expression()?;

        if self.repl_mode && self.check(TokenType::Eof) {
            return Ok(Stmt::Expression(ExpressionData { expression }));
        }

        self.consume(TokenType::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(ExpressionData { expression }))
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.comma()
    }

    fn comma(&mut self) -> ParseResult<Expr> {
        let mut expr = self.assignment()?;
        while self.matches(&[TokenType::Comma]) {
            let right = self.assignment()?;
            // Evaluated left-to-right for side effects; only the rightmost
            // value survives, so it's modeled directly as a Binary node
            // with the comma's own operator rather than a new Expr variant.
            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator: Token::synthetic(TokenType::Comma, ","),
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.ternary()?;

        if self.matches(&[TokenType::Equal]) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return match expr {
                Expr::Variable(data) => Ok(Expr::Assign(AssignData { id: NodeId::fresh(), name: data.name, value: Box::new(value) })),
                Expr::Get(data) => Ok(Expr::Set(SetData { object: data.object, name: data.name, value: Box::new(value) })),
                _ => {
                    self.error(equals, "Invalid assignment target.");
                    Err(Bailout)
                }
            };
        }

        Ok(expr)
    }

    fn ternary(&mut self) -> ParseResult<Expr> {
        let condition = self.or()?;

        if self.matches(&[TokenType::Question]) {
            let then_branch = self.expression()?;
            self.consume(TokenType::Colon, "Expect ':' after then branch of ternary expression.")?;
            let else_branch = self.ternary()?;
            return Ok(Expr::Ternary(TernaryData {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            }));
        }

        Ok(condition)
    }

    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;
        while self.matches(&[TokenType::Or]) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical(LogicalData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;
        while self.matches(&[TokenType::And]) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical(LogicalData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;
        while self.matches(&[TokenType::BangEqual, TokenType::EqualEqual]) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;
        while self.matches(&[TokenType::Greater, TokenType::GreaterEqual, TokenType::Less, TokenType::LessEqual]) {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;
        while self.matches(&[TokenType::Minus, TokenType::Plus]) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;
        while self.matches(&[TokenType::Slash, TokenType::Star]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if self.matches(&[TokenType::Bang, TokenType::Minus]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary(UnaryData { operator, right: Box::new(right) }));
        }
        self.call()
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if self.matches(&[TokenType::LeftParen]) {
                expr = self.finish_call(expr)?;
            } else if self.matches(&[TokenType::Dot]) {
                let name = self.consume(TokenType::Identifier, "Expect property name after '.'.")?;
                expr = Expr::Get(GetData { object: Box::new(expr), name });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();
        if !self.check(TokenType::RightParen) {
            loop {
                if arguments.len() >= MAX_ARGS {
                    self.error(self.peek().clone(), &format!("Can't have more than {MAX_ARGS} arguments."));
                }
                arguments.push(self.assignment()?);
                if !self.matches(&[TokenType::Comma]) {
                    break;
                }
            }
        }
        let paren = self.consume(TokenType::RightParen, "Expect ')' after arguments.")?;
        Ok(Expr::Call(CallData { callee: Box::new(callee), paren, arguments }))
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if self.matches(&[TokenType::False]) {
            return Ok(Expr::Literal(crate::literal::Literal::Bool(false)));
        }
        if self.matches(&[TokenType::True]) {
            return Ok(Expr::Literal(crate::literal::Literal::Bool(true)));
        }
        if self.matches(&[TokenType::Nil]) {
            return Ok(Expr::Literal(crate::literal::Literal::Nil));
        }
        if self.matches(&[TokenType::Number, TokenType::String]) {
            return Ok(Expr::Literal(self.previous().literal.clone().expect("scanner always attaches a literal")));
        }
        if self.matches(&[TokenType::Super]) {
            let keyword = self.previous().clone();
            self.consume(TokenType::Dot, "Expect '.' after 'super'.")?;
            let method = self.consume(TokenType::Identifier, "Expect superclass method name.")?;
            return Ok(Expr::Super(SuperData { id: NodeId::fresh(), keyword, method }));
        }
        if self.matches(&[TokenType::This]) {
            return Ok(Expr::This(ThisData { id: NodeId::fresh(), keyword: self.previous().clone() }));
        }
        if self.matches(&[TokenType::Identifier]) {
            return Ok(Expr::Variable(VariableData { id: NodeId::fresh(), name: self.previous().clone() }));
        }
        if self.matches(&[TokenType::Fun]) {
            return Ok(Expr::Lambda(self.lambda_body("lambda")?));
        }
        if self.matches(&[TokenType::LeftParen]) {
            let expr = self.expression()?;
            self.consume(TokenType::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(GroupingData { expression: Box::new(expr) }));
        }

        let token = self.peek().clone();
        self.error(token, "Expect expression.");
        Err(Bailout)
    }

    // --- token stream primitives ---

    fn matches(&mut self, kinds: &[TokenType]) -> bool {
        for kind in kinds {
            if self.check(*kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, kind: TokenType) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenType::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn consume(&mut self, kind: TokenType, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        let token = self.peek().clone();
        self.error(token, message);
        Err(Bailout)
    }

    fn error(&mut self, token: Token, message: &str) {
        self.diagnostics.report_parse(&ParseError { token, message: message.to_string() });
    }

    /// Discards tokens until the start of the next statement, so a single
    /// syntax error doesn't cascade into a wall of spurious follow-on
    /// errors.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == TokenType::Semicolon {
                return;
            }
            match self.peek().kind {
                TokenType::Class
                | TokenType::Fun
                | TokenType::Var
                | TokenType::For
                | TokenType::If
                | TokenType::While
                | TokenType::Print
                | TokenType::Return
                | TokenType::Break
                | TokenType::Continue => return,
                _ => {}
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;

    fn parse(source: &str) -> (Vec<Stmt>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        let statements = Parser::new(tokens, &mut diagnostics).parse();
        (statements, diagnostics)
    }

    #[test]
    fn parses_var_declaration() {
        let (statements, diagnostics) = parse("var a = 1;");
        assert!(!diagnostics.had_error());
        assert_eq!(statements.len(), 1);
        assert!(matches!(statements[0], Stmt::Var(_)));
    }

    #[test]
    fn for_loop_desugars_to_block_containing_while() {
        let (statements, diagnostics) = parse("for (var i = 0; i < 3; i = i + 1) print i;");
        assert!(!diagnostics.had_error());
        match &statements[0] {
            Stmt::Block(block) => {
                assert_eq!(block.statements.len(), 2);
                assert!(matches!(block.statements[0], Stmt::Var(_)));
                assert!(matches!(block.statements[1], Stmt::While(_)));
            }
            other => panic!("expected desugared block, got {other:?}"),
        }
    }

    #[test]
    fn invalid_assignment_target_is_an_error() {
        let (_, diagnostics) = parse("1 = 2;");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn ternary_is_right_associative() {
        let (statements, diagnostics) = parse("var a = true ? 1 : false ? 2 : 3;");
        assert!(!diagnostics.had_error());
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn comma_operator_chains_expressions() {
        let (statements, diagnostics) = parse("1, 2, 3;");
        assert!(!diagnostics.had_error());
        assert!(matches!(&statements[0], Stmt::Expression(data) if matches!(data.expression, Expr::Binary(_))));
    }

    #[test]
    fn repl_line_without_semicolon_is_accepted_as_expression_statement() {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new("1 + 1").scan_tokens(&mut diagnostics);
        let statements = Parser::new(tokens, &mut diagnostics).parse_repl_line();
        assert!(!diagnostics.had_error());
        assert_eq!(statements.len(), 1);
        assert!(matches!(statements[0], Stmt::Expression(_)));
    }

    #[test]
    fn class_with_superclass() {
        let (statements, diagnostics) = parse("class A {} class B < A { init() {} }");
        assert!(!diagnostics.had_error());
        match &statements[1] {
            Stmt::Class(data) => assert!(data.superclass.is_some()),
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn break_outside_loop_is_reported() {
        let (_, diagnostics) = parse("break;");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn continue_outside_loop_is_reported() {
        let (_, diagnostics) = parse("continue;");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn break_inside_while_is_not_reported() {
        let (_, diagnostics) = parse("while (true) break;");
        assert!(!diagnostics.had_error());
    }
}
