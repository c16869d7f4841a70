use crate::token::{Location, Token, Type};

/// Collects the error state of a single run.
///
/// The scanner, parser, resolver and interpreter all report their
/// diagnostics through the same sink. The driver inspects the flags to
/// decide whether to keep going after each phase and to pick the process
/// exit code. The REPL resets the flags between prompts.
#[derive(Debug, Default)]
pub struct ErrorSink {
    had_error: bool,
    had_runtime_error: bool,
}

impl ErrorSink {
    pub fn new() -> Self {
        ErrorSink::default()
    }

    /// Returns if a scan, parse or resolve error was reported.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Returns if a runtime error reached the top level.
    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Resets both flags between REPL prompts.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    fn report(&mut self, line: usize, location: &str, message: &str) {
        eprintln!("[line {line}] Error{location}: {message}");
        self.had_error = true;
    }
}

/// Every error type must implement this trait.
pub trait Error {
    /// Prints the error message to stderr and sets the matching flag.
    fn throw(&self, sink: &mut ErrorSink);
}

/// Represents an error that occurs during scanning.
#[derive(Debug)]
pub struct ScanError {
    pub location: Location,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self, sink: &mut ErrorSink) {
        sink.report(self.location.line, "", &self.message);
    }
}

/// Represents an error that occurs during parsing.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn throw(&self, sink: &mut ErrorSink) {
        if self.token.r#type == Type::EOF {
            sink.report(self.token.location.line, " at end", &self.message);
        } else {
            let location = format!(" at '{}'", self.token.lexeme);
            sink.report(self.token.location.line, &location, &self.message);
        }
    }
}

/// Represents an error that occurs during resolution.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self, sink: &mut ErrorSink) {
        if self.token.r#type == Type::EOF {
            sink.report(self.token.location.line, " at end", &self.message);
        } else {
            let location = format!(" at '{}'", self.token.lexeme);
            sink.report(self.token.location.line, &location, &self.message);
        }
    }
}

/// Represents an error that occurs during runtime.
///
/// Unlike the other kinds, runtime errors are not printed where they are
/// raised. They propagate as `Err` values up to the top-level `interpret`
/// call, which reports the one that unwound the evaluation.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self, sink: &mut ErrorSink) {
        eprintln!("{message}\n[line {line}]", message = self.message, line = self.token.location.line);
        sink.had_runtime_error = true;
    }
}
