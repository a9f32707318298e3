//! Rocks is a tree-walking interpreter for a small dynamically-typed,
//! lexically-scoped, class-based scripting language. It is a hobby project
//! inspired by the [Crafting Interpreters](https://craftinginterpreters.com/)
//! book by Bob Nystrom, reworked around a tagged-enum AST and an explicit
//! `Diagnostics` collaborator instead of double-dispatch visitors and
//! process-wide error flags.
//!
//! ## Pipeline
//! Source text flows one way through four stages, leaves first:
//!
//! 1. [`scanner`] turns source text into a token stream terminated by
//!    exactly one `Eof`. Lexical errors (an unterminated string, a stray
//!    character) are reported but do not stop scanning.
//! 2. [`parser`] turns tokens into a list of [`stmt::Stmt`] nodes via
//!    recursive descent with panic-mode error recovery: a malformed
//!    statement is skipped, not fatal to the rest of the file.
//! 3. [`resolver`] walks the parsed tree once, recording how many lexical
//!    scopes separate each variable reference from its declaration. This
//!    side table is what lets `{ fun show() { print a; } show(); var a = 2; }`
//!    resolve the closure's `a` to the outer one, the way a human reading
//!    the block would expect.
//! 4. [`interpreter`] walks the tree a second time, this time to actually
//!    run it, consulting the resolver's side table instead of re-deriving
//!    scope from scratch.
//!
//! [`Rocks`] is the driver that owns one [`interpreter::Interpreter`] (so
//! globals persist across REPL lines) and one [`diagnostics::Diagnostics`]
//! sink, and wires the four stages together for both script and prompt
//! mode.

pub mod class;
pub mod diagnostics;
pub mod environment;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod signal;
pub mod stmt;
pub mod token;

use std::io::Write;

use diagnostics::Diagnostics;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// Top-level driver tying the pipeline stages to a persistent interpreter
/// and diagnostic sink. `output` receives everything a `print` statement
/// writes; `errors` receives scan/parse/resolve/runtime diagnostics.
pub struct Rocks {
    interpreter: Interpreter,
    diagnostics: Diagnostics,
}

impl Rocks {
    /// Builds a driver that writes program output to stdout and
    /// diagnostics to stderr, as the binary does.
    pub fn new() -> Self {
        Rocks { interpreter: Interpreter::new(Box::new(std::io::stdout())), diagnostics: Diagnostics::new() }
    }

    /// Builds a driver with injected sinks, so tests can capture stdout
    /// and stderr independently instead of writing to the real streams.
    pub fn with_writers(output: Box<dyn Write>, errors: Box<dyn Write>) -> Self {
        Rocks { interpreter: Interpreter::new(output), diagnostics: Diagnostics::with_writer(errors) }
    }

    pub fn had_error(&self) -> bool {
        self.diagnostics.had_error()
    }

    pub fn had_runtime_error(&self) -> bool {
        self.diagnostics.had_runtime_error()
    }

    /// Runs the pipeline over one chunk of source, threading the same
    /// `Diagnostics` sink through every stage. The driver refuses to hand
    /// a tree to the interpreter once scanning, parsing or resolution has
    /// reported an error — a syntactically or semantically broken program
    /// is never partially executed.
    pub fn run(&mut self, source: &str, allow_single_expression: bool) {
        let tokens = Scanner::new(source).scan_tokens(&mut self.diagnostics);
        if self.diagnostics.had_error() {
            return;
        }

        let mut parser = Parser::new(tokens, &mut self.diagnostics);
        let statements = if allow_single_expression { parser.parse_repl_line() } else { parser.parse() };
        if self.diagnostics.had_error() {
            return;
        }

        let locals = Resolver::new(&mut self.diagnostics).resolve(&statements);
        if self.diagnostics.had_error() {
            return;
        }

        self.interpreter.interpret(&statements, locals, &mut self.diagnostics);
    }

    /// Reads and runs a script file. Returns the process exit code the
    /// driver should use: 0 on success, 65 on a scan/parse/resolve error,
    /// 70 on a runtime error, or 66 if the file could not be read (a
    /// `sysexits.h`-style "cannot open input" code distinct from a
    /// language error, since a missing or unreadable script is a usage
    /// problem rather than a bug in the source it names).
    pub fn run_file(&mut self, path: &std::path::Path) -> u8 {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(error) => {
                eprintln!("Can't read file '{}': {error}", path.display());
                return 66;
            }
        };

        self.run(&source, false);

        if self.had_error() {
            65
        } else if self.had_runtime_error() {
            70
        } else {
            0
        }
    }

    /// Reads and runs one line at a time from stdin until `Ctrl-D` (EOF).
    /// Each line is parsed in single-expression mode, so a bare expression
    /// typed without a trailing `;` parses as an ordinary expression
    /// statement instead of failing on the missing semicolon. Diagnostic
    /// flags reset before every line, but the global environment — and
    /// thus anything a prior line declared — survives for the rest of the
    /// session.
    pub fn run_prompt(&mut self) {
        let mut editor = rustyline::DefaultEditor::new().expect("failed to initialize line editor");

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.diagnostics.reset();
                    self.run(&line, true);
                }
                Err(rustyline::error::ReadlineError::Eof) => break,
                Err(rustyline::error::ReadlineError::Interrupted) => continue,
                Err(error) => {
                    eprintln!("Readline error: {error}");
                    break;
                }
            }
        }
    }
}

impl Default for Rocks {
    fn default() -> Self {
        Rocks::new()
    }
}
