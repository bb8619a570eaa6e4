use crate::object::Object;
use crate::token::{Location, Token, Type};

/// Collects the error state of a single pipeline run. The driver owns one
/// and hands it to each stage; execution is skipped when any stage flagged
/// an error.
#[derive(Debug, Default)]
pub struct Reporter {
    had_error: bool,
    had_runtime_error: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter::default()
    }

    /// Returns if a scan, parse, or resolve error was reported.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Returns if a runtime error was reported.
    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears the error state. The prompt calls this before every line so
    /// one bad entry does not poison the session.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

/// Every error type must implement this trait.
pub trait Error {
    /// Prints the error message to stderr and flags the reporter.
    fn throw(&self, reporter: &mut Reporter);
}

/// Represents an error that occurs during scanning.
#[derive(Debug)]
pub struct ScanError {
    pub location: Location,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self, reporter: &mut Reporter) {
        eprintln!("[line {}] Error: {}", self.location.line, self.message);
        reporter.had_error = true;
    }
}

/// Represents an error that occurs during parsing.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn throw(&self, reporter: &mut Reporter) {
        if self.token.r#type == Type::EOF {
            eprintln!("[line {}] Error at end: {}", self.token.location.line, self.message);
        } else {
            eprintln!(
                "[line {}] Error at '{}': {}",
                self.token.location.line, self.token.lexeme, self.message
            );
        }

        reporter.had_error = true;
    }
}

/// Represents an error that occurs during resolution.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self, reporter: &mut Reporter) {
        eprintln!(
            "[line {}] Error at '{}': {}",
            self.token.location.line, self.token.lexeme, self.message
        );

        reporter.had_error = true;
    }
}

/// Represents an error that occurs during runtime.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self, reporter: &mut Reporter) {
        eprintln!("{}\n[line {}]", self.message, self.token.location.line);
        reporter.had_runtime_error = true;
    }
}

/// Non-local control flow propagated up the tree walk. `return` is caught
/// by the enclosing function call and `break` by the enclosing loop; a
/// signal that escapes past its construct is a resolver bug.
#[derive(Debug)]
pub enum Interrupt {
    Return(Object),
    Break,
    Error(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Interrupt::Error(error)
    }
}

pub type ExecResult<T> = Result<T, Interrupt>;
