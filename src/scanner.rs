//! Converts source text into a flat token stream.
//!
//! The scanner never fails outright: lexical errors (an unexpected
//! character, an unterminated string or block comment) are reported to the
//! [`Diagnostics`](crate::diagnostics::Diagnostics) sink and scanning
//! continues at the next character, so a single pass always produces a
//! token list ending in exactly one `Eof`.

use peekmore::{PeekMore, PeekMoreIterator};
use std::str::Chars;

use crate::diagnostics::{Diagnostics, ScanError};
use crate::literal::Literal;
use crate::token::{Token, TokenType};

pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    current_lexeme: String,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source: source.chars().peekmore(),
            tokens: Vec::new(),
            current_lexeme: String::new(),
            line: 1,
        }
    }

    /// Scans the whole source and returns its tokens, terminated by exactly
    /// one `Eof`.
    pub fn scan_tokens(&mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        while self.peek().is_some() {
            self.current_lexeme.clear();
            self.scan_token(diagnostics);
        }

        self.tokens.push(Token::new(TokenType::Eof, "", None, self.line));
        std::mem::take(&mut self.tokens)
    }

    fn advance(&mut self) -> char {
        let c = self.source.next().expect("advance called past end of input");
        self.current_lexeme.push(c);
        c
    }

    fn peek(&mut self) -> Option<char> {
        self.source.peek().copied()
    }

    fn peek_next(&mut self) -> Option<char> {
        self.source.peek_next().copied()
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenType) {
        self.add_token_literal(kind, None);
    }

    fn add_token_literal(&mut self, kind: TokenType, literal: Option<Literal>) {
        self.tokens.push(Token::new(kind, self.current_lexeme.clone(), literal, self.line));
    }

    fn scan_token(&mut self, diagnostics: &mut Diagnostics) {
        let c = self.advance();
        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),
            '?' => self.add_token(TokenType::Question),
            ':' => self.add_token(TokenType::Colon),

            '!' => {
                let kind = if self.match_next('=') { TokenType::BangEqual } else { TokenType::Bang };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_next('=') { TokenType::EqualEqual } else { TokenType::Equal };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_next('=') { TokenType::LessEqual } else { TokenType::Less };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_next('=') { TokenType::GreaterEqual } else { TokenType::Greater };
                self.add_token(kind);
            }

            '/' => {
                if self.match_next('/') {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                } else if self.match_next('*') {
                    self.block_comment(diagnostics);
                } else {
                    self.add_token(TokenType::Slash);
                }
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '"' => self.string(diagnostics),

            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            other => {
                diagnostics.report_scan(&ScanError {
                    line: self.line,
                    message: format!("Unexpected character '{other}'."),
                });
            }
        }
    }

    /// Consumes a `/* ... */` block comment, counting embedded newlines.
    /// Comments do not nest. Reaching end of input without a closing `*/`
    /// is reported as an unterminated-block-comment error.
    fn block_comment(&mut self, diagnostics: &mut Diagnostics) {
        loop {
            match self.peek() {
                None => {
                    diagnostics.report_scan(&ScanError {
                        line: self.line,
                        message: "Unterminated block comment.".to_string(),
                    });
                    return;
                }
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    return;
                }
                Some('\n') => {
                    self.line += 1;
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn string(&mut self, diagnostics: &mut Diagnostics) {
        let start_line = self.line;
        let mut value = String::new();

        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            value.push(c);
            self.advance();
        }

        if self.peek().is_none() {
            diagnostics.report_scan(&ScanError {
                line: start_line,
                message: "Unterminated string.".to_string(),
            });
            return;
        }

        self.advance(); // closing quote

        self.add_token_literal(TokenType::String, Some(Literal::String(value)));
    }

    fn number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume the '.'
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let value: f64 = self.current_lexeme.parse().expect("scanned number to be valid");
        self.add_token_literal(TokenType::Number, Some(Literal::Number(value)));
    }

    fn identifier(&mut self) {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let kind = match self.current_lexeme.as_str() {
            "and" => TokenType::And,
            "class" => TokenType::Class,
            "else" => TokenType::Else,
            "false" => TokenType::False,
            "for" => TokenType::For,
            "fun" => TokenType::Fun,
            "if" => TokenType::If,
            "nil" => TokenType::Nil,
            "or" => TokenType::Or,
            "print" => TokenType::Print,
            "return" => TokenType::Return,
            "super" => TokenType::Super,
            "this" => TokenType::This,
            "true" => TokenType::True,
            "var" => TokenType::Var,
            "while" => TokenType::While,
            "break" => TokenType::Break,
            "continue" => TokenType::Continue,
            _ => TokenType::Identifier,
        };

        self.add_token(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> (Vec<Token>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        (tokens, diagnostics)
    }

    #[test]
    fn always_ends_in_exactly_one_eof() {
        let (tokens, _) = scan("var a = 1;");
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenType::Eof).count(), 1);
        assert_eq!(tokens.last().unwrap().kind, TokenType::Eof);
    }

    #[test]
    fn empty_source_is_just_eof() {
        let (tokens, diagnostics) = scan("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenType::Eof);
        assert!(!diagnostics.had_error());
    }

    #[test]
    fn numbers_and_operators() {
        let (tokens, _) = scan("1 + 2.5 * 3");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenType::Number,
                TokenType::Plus,
                TokenType::Number,
                TokenType::Star,
                TokenType::Number,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn keyword_table_promotes_identifiers() {
        let (tokens, _) = scan("class fun break continue notAKeyword");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenType::Class,
                TokenType::Fun,
                TokenType::Break,
                TokenType::Continue,
                TokenType::Identifier,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn block_comment_spans_lines() {
        let (tokens, diagnostics) = scan("1 /* comment\nover two lines */ 2");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenType::Number, TokenType::Number, TokenType::Eof]);
        assert!(!diagnostics.had_error());
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn unterminated_string_reports_error() {
        let (_, diagnostics) = scan("\"unterminated");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn unterminated_block_comment_reports_error() {
        let (_, diagnostics) = scan("/* never closes");
        assert!(diagnostics.had_error());
    }

    #[test]
    fn string_literal_spans_lines_and_strips_quotes() {
        let (tokens, _) = scan("\"a\nb\"");
        assert_eq!(tokens[0].literal, Some(Literal::String("a\nb".to_string())));
    }
}
