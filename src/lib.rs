#![allow(clippy::needless_return)]

//! Rune is a small, dynamically typed scripting language with C-style
//! syntax, lexical scoping, first-class functions, and single-inheritance
//! classes. This crate is a tree-walk interpreter for it: a hand-written
//! recursive descent parser builds an abstract syntax tree (AST) which is
//! statically resolved and then evaluated directly. Rune is a hobby
//! project and is not intended for production use.
//!
//! ## Scanning
//! The first step is scanning: converting the source string into a list of
//! tokens. A token is a single unit of the language, so the string `1 + 2`
//! becomes
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as a
//! single forward pass over the characters of the source. It reports
//! trivial problems, like an unterminated string literal or an unexpected
//! character, as a [`ScanError`](error::ScanError) and keeps scanning so
//! the user can fix several mistakes at once.
//!
//! ## Parsing
//! The second step is parsing: converting the token list into an AST. The
//! parser in the [`parser`](parser) module is a recursive descent parser
//! that transforms tokens into [expressions](expr::Expr), which produce a
//! value, and [statements](stmt::Stmt), which perform an action. Besides
//! the usual operators, Rune has a comma operator, a ternary conditional,
//! and anonymous `lambda` functions; `for` loops are desugared into
//! `while` loops during this step. Parse errors are reported as a
//! [`ParseError`](error::ParseError) and the parser synchronizes at the
//! next statement boundary to keep going.
//!
//! ## Resolving
//! The third step is resolving. The [`resolver`](resolver) walks the AST
//! once and records, for every variable reference, how many scopes sit
//! between the use and the declaration. It also rejects code that is
//! syntactically fine but semantically wrong, such as reading a local in
//! its own initializer, `return` at the top level, `break` outside a loop,
//! `this` outside a class, or a class inheriting from itself. These are
//! reported as a [`ResolveError`](error::ResolveError).
//!
//! ## Interpreting
//! The final step is interpreting. The [`interpreter`](interpreter) walks
//! the resolved tree and evaluates it against a chain of
//! [environments](environment::Environment), one per scope, which is what
//! makes closures work. Errors that can only be caught while the program
//! runs, like adding a boolean to a number or calling something that is
//! not callable, are reported as a [`RuntimeError`](error::RuntimeError)
//! and stop execution.

use std::io::Write;
use std::{fs, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use error::{Error, Reporter};
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The interpreter driver. Owns the pipeline state that lives across
/// prompt lines: the interpreter itself, the diagnostics sink, and the
/// node id counter.
#[allow(non_camel_case_types)]
pub struct rune<'a> {
    interpreter: Interpreter<'a>,
    reporter: Reporter,
    next_id: usize,
}

impl<'a> rune<'a> {
    /// Creates a new driver writing `print` output to the given stream.
    pub fn new(output: &'a mut dyn Write) -> Self {
        rune {
            interpreter: Interpreter::new(output),
            reporter: Reporter::new(),
            next_id: 0,
        }
    }

    /// Runs the script at `path` once and exits with a non-zero code if it
    /// failed to compile or raised a runtime error.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("should have been able to read the script");

        self.run(&contents);

        if self.reporter.had_error() {
            process::exit(65);
        }
        if self.reporter.had_runtime_error() {
            process::exit(70);
        }
    }

    /// Reads and runs one line at a time. Errors are reported and the next
    /// prompt starts clean.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("should have been able to open the prompt");

        let history = home::home_dir().map(|path| path.join(".rune_history"));
        if let Some(history) = &history {
            let _ = editor.load_history(history);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run(&line);
                    self.reporter.reset();
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("failed to read line: {error}");
                    break;
                },
            }
        }

        if let Some(history) = &history {
            let _ = editor.save_history(history);
        }
    }

    /// Runs one source string through the whole pipeline. Each stage only
    /// runs if the previous ones reported no error.
    fn run(&mut self, source: &str) {
        let mut scanner = Scanner::new(source, &mut self.reporter);
        let tokens = scanner.scan_tokens();

        if self.reporter.had_error() {
            return;
        }

        let mut parser = Parser::new(tokens, self.next_id, &mut self.reporter);
        let statements = parser.parse();
        self.next_id = parser.next_id();

        if self.reporter.had_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter, &mut self.reporter);
        resolver.resolve(&statements);

        if self.reporter.had_error() {
            return;
        }

        if let Err(error) = self.interpreter.interpret(&statements) {
            error.throw(&mut self.reporter);
        }
    }
}
