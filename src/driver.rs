use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use log::{debug, info};

use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use crate::stmt::Stmt;
use crate::token::Token;

/// Process-wide driver: owns the persistent interpreter and the three error
/// flags, one per phase. Each flag latches when its phase reports a failure;
/// the pipeline stops at the first latched flag.
pub struct Lox {
    interpreter: Interpreter,
    had_parse_error: bool,
    had_resolution_error: bool,
    had_runtime_error: bool,
}

impl Lox {
    pub fn new() -> Self {
        Lox {
            interpreter: Interpreter::new(),
            had_parse_error: false,
            had_resolution_error: false,
            had_runtime_error: false,
        }
    }

    /// True when any phase flag latched; the file runner exits 1 on it.
    pub fn had_error(&self) -> bool {
        self.had_parse_error || self.had_resolution_error || self.had_runtime_error
    }

    pub fn run_file(&mut self, path: &Path) -> anyhow::Result<()> {
        info!("Executing script {}", path.display());

        let source: Vec<u8> = fs::read(path)?;

        self.run(source);

        Ok(())
    }

    /// Interactive prompt: each line is a complete program. Interpreter state
    /// persists between lines; the error flags do not.
    pub fn run_prompt(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            write!(stdout, "> ")?;
            stdout.flush()?;

            let mut line = String::new();

            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }

            self.run(line.into_bytes());

            self.had_parse_error = false;
            self.had_resolution_error = false;
            self.had_runtime_error = false;
        }

        Ok(())
    }

    /// Source text → tokens → statements → resolved statements → execution,
    /// short-circuiting after any phase that latched a flag.
    fn run(&mut self, source: Vec<u8>) {
        let tokens: Vec<Token> = match Scanner::new(source).scan_tokens() {
            Ok(tokens) => tokens,

            Err(error) => {
                eprintln!("{}", error);
                self.had_parse_error = true;
                return;
            }
        };

        let mut parser: Parser = Parser::new(tokens);

        let statements: Vec<Stmt> = match parser.parse() {
            Ok(statements) => statements,

            Err(error) => {
                eprintln!("{}", error);
                self.had_parse_error = true;
                return;
            }
        };

        // The argument-limit diagnostic reports without unwinding.
        if parser.had_error() {
            self.had_parse_error = true;
            return;
        }

        debug!("Parsed {} top-level statement(s)", statements.len());

        let mut resolver: Resolver<'_, io::Stdout> = Resolver::new(&mut self.interpreter);

        if let Err(error) = resolver.resolve(&statements) {
            eprintln!("{}", error);
            self.had_resolution_error = true;
            return;
        }

        if let Err(error) = self.interpreter.interpret(&statements) {
            eprintln!("{}", error);
            self.had_runtime_error = true;
        }
    }
}

impl Default for Lox {
    fn default() -> Self {
        Lox::new()
    }
}
