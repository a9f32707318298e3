//! Error and warning reporting, decoupled from any particular pipeline
//! stage.
//!
//! A single [`Diagnostics`] value is owned by the driver ([`crate::Rocks`])
//! and threaded by mutable reference through the scanner, parser, resolver
//! and interpreter. Each stage reports through its own `report_*` method;
//! `Diagnostics` tracks whether anything fatal was seen so the driver can
//! decide the process exit code and whether to keep executing.

use std::fmt;

use crate::token::{Token, TokenType};

pub struct ScanError {
    pub line: usize,
    pub message: String,
}

pub struct ParseError {
    pub token: Token,
    pub message: String,
}

pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

/// A raised runtime fault, carrying the token whose evaluation triggered it
/// so the diagnostic line can point at a source position.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RuntimeError {}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        RuntimeError { token, message: message.into() }
    }
}

/// Collects scan/parse/resolve/runtime diagnostics against an injected
/// sink, and tracks the two sticky flags the driver needs: whether a
/// static (scan/parse/resolve) error occurred, and whether a runtime
/// error occurred.
pub struct Diagnostics {
    out: Box<dyn std::io::Write>,
    had_error: bool,
    had_runtime_error: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { out: Box::new(std::io::stderr()), had_error: false, had_runtime_error: false }
    }

    pub fn with_writer(out: Box<dyn std::io::Write>) -> Self {
        Diagnostics { out, had_error: false, had_runtime_error: false }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Resets the static-error flag so a REPL can keep accepting input
    /// after a bad line. The runtime-error flag is left alone: it only
    /// matters for the file-mode exit code.
    pub fn reset(&mut self) {
        self.had_error = false;
    }

    pub fn report_scan(&mut self, error: &ScanError) {
        self.emit(error.line, "", &error.message);
        self.had_error = true;
    }

    pub fn report_parse(&mut self, error: &ParseError) {
        let location = if error.token.kind == TokenType::Eof {
            " at end".to_string()
        } else {
            format!(" at '{}'", error.token.lexeme)
        };
        self.emit(error.token.line, &location, &error.message);
        self.had_error = true;
    }

    pub fn report_resolve(&mut self, error: &ResolveError) {
        let location = if error.token.kind == TokenType::Eof {
            " at end".to_string()
        } else {
            format!(" at '{}'", error.token.lexeme)
        };
        self.emit(error.token.line, &location, &error.message);
        self.had_error = true;
    }

    /// Unused-variable and similar advisory notices. These never set
    /// `had_error`: they don't stop the program from running.
    pub fn report_resolve_warning(&mut self, error: &ResolveError) {
        let location = if error.token.kind == TokenType::Eof {
            " at end".to_string()
        } else {
            format!(" at '{}'", error.token.lexeme)
        };
        let _ = writeln!(self.out, "[line {}] Warning{}: {}", error.token.line, location, error.message);
    }

    pub fn report_runtime(&mut self, error: &RuntimeError) {
        self.emit(error.token.line, "", &error.message);
        self.had_runtime_error = true;
    }

    fn emit(&mut self, line: usize, location: &str, message: &str) {
        let _ = writeln!(self.out, "[line {line}] Error{location}: {message}");
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Diagnostics::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_sets_had_error() {
        let mut diagnostics = Diagnostics::with_writer(Box::new(Vec::new()));
        diagnostics.report_scan(&ScanError { line: 1, message: "bad".to_string() });
        assert!(diagnostics.had_error());
    }

    #[test]
    fn reset_clears_static_error_but_not_runtime_error() {
        let mut diagnostics = Diagnostics::with_writer(Box::new(Vec::new()));
        diagnostics.report_scan(&ScanError { line: 1, message: "bad".to_string() });
        diagnostics.report_runtime(&RuntimeError::new(Token::synthetic(TokenType::Nil, "nil"), "boom".to_string()));
        diagnostics.reset();
        assert!(!diagnostics.had_error());
        assert!(diagnostics.had_runtime_error());
    }

    #[test]
    fn warning_does_not_set_had_error() {
        let mut diagnostics = Diagnostics::with_writer(Box::new(Vec::new()));
        diagnostics.report_resolve_warning(&ResolveError {
            token: Token::synthetic(TokenType::Identifier, "x"),
            message: "unused".to_string(),
        });
        assert!(!diagnostics.had_error());
    }
}
