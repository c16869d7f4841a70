//! A tree-walk interpreter for Lox, the dynamically typed language from
//! [Crafting Interpreters](https://craftinginterpreters.com/). Lox has
//! first-class functions, lexical closures and single-inheritance classes
//! with `this` and `super`. This crate implements the whole front end and
//! evaluator of the "jlox" variant: scanner, recursive descent parser,
//! static resolver and tree-walking interpreter.
//!
//! ## Scanning
//! The first step is scanning: turning the source string into a list of
//! tokens. The scanner lives in the [`scanner`] module and walks the source
//! a character at a time, tracking line and column as it goes. Trivial
//! syntax problems like an unterminated string literal or a stray character
//! are reported as a [`ScanError`](error::ScanError) and scanning keeps
//! going, so the user sees every lexical error in one run.
//!
//! ## Parsing
//! The second step is parsing: turning the token list into an abstract
//! syntax tree. The parser in the [`parser`] module is a hand-written
//! recursive descent parser over the [`Expr`](expr::Expr) and
//! [`Stmt`](stmt::Stmt) sum types. On a syntax error it reports a
//! [`ParseError`](error::ParseError), discards tokens until the next
//! statement boundary and resumes, so one mistake does not hide the rest of
//! the file.
//!
//! ## Resolving
//! The third step is a static pass over the AST. The [`resolver`] walks
//! every scope and records, for each variable reference, how many
//! environments up its declaration lives. The same pass catches the
//! mistakes that are grammatical but nonsense: `return` at the top level,
//! `this` outside a class, a local variable read in its own initializer,
//! two declarations of the same name in one scope. Those are reported as a
//! [`ResolveError`](error::ResolveError).
//!
//! ## Interpreting
//! The last step evaluates the AST directly. The [`interpreter`] executes
//! statements against a chain of [`Environment`](environment::Environment)s
//! and produces [`Object`](object::Object) values: literals, functions,
//! classes and instances. Errors that can only be caught while the program
//! runs, like adding a string to a number or calling something that is not
//! callable, unwind to the top of the run as a
//! [`RuntimeError`](error::RuntimeError).
//!
//! The three front-end phases and the interpreter all report through one
//! [`ErrorSink`](error::ErrorSink), which the [`lox`] driver consults
//! between phases and the binary maps onto the conventional exit codes
//! (65 for compile errors, 70 for runtime errors).

use std::fs;
use std::io::Write;

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

use error::ErrorSink;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use scanner::Scanner;

/// The driver: owns the interpreter, the error sink and the node id
/// counter, and wires the phases together. Program output is written to
/// the injected writer so tests can capture it.
#[allow(non_camel_case_types)]
pub struct lox<'a> {
    interpreter: Interpreter<'a>,
    sink: ErrorSink,
    next_id: usize,
}

impl<'a> lox<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        lox {
            interpreter: Interpreter::new(out),
            sink: ErrorSink::new(),
            next_id: 0,
        }
    }

    /// Returns if a scan, parse or resolve error was reported.
    pub fn had_error(&self) -> bool {
        self.sink.had_error()
    }

    /// Returns if a runtime error reached the top level.
    pub fn had_runtime_error(&self) -> bool {
        self.sink.had_runtime_error()
    }

    /// Reads and runs a source file. The caller maps the sink flags onto
    /// an exit code.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("Should have been able to read the file");

        self.run(&contents);
    }

    /// Runs the interactive prompt. The error flags reset between lines so
    /// one bad line does not poison the next, and the interpreter carries
    /// its globals across lines. History persists in the home directory.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("readline to initialize");

        let history = home::home_dir().map(|path| path.join(".lox_history"));
        if let Some(history) = &history {
            let _ = editor.load_history(history);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());

                    self.run(&line);
                    self.sink.reset();
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("readline error: {error}");
                    break;
                },
            }
        }

        if let Some(history) = &history {
            let _ = editor.save_history(history);
        }
    }

    fn run(&mut self, source: &str) {
        let mut scanner = Scanner::new(source, &mut self.sink);
        let tokens = scanner.scan_tokens();

        let mut parser = Parser::new(tokens, self.next_id, &mut self.sink);
        let statements = parser.parse();
        self.next_id = parser.next_id();

        if self.sink.had_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter, &mut self.sink);
        resolver.resolve(&statements);

        if self.sink.had_error() {
            return;
        }

        self.interpreter.interpret(&statements, &mut self.sink);
    }
}
