//! Centralised error hierarchy for the interpreter.
//!
//! All phases (scanner, parser, resolver, evaluator, CLI) convert their
//! failure modes into one of the variants defined here. This enables a
//! uniform `Result<T>` alias throughout the crate and ergonomic
//! inter-operation with `anyhow` at the binary boundary, while preserving the
//! line-tagged diagnostic format the conformance tests assert on.
//!
//! The module does not print diagnostics itself; the driver does.

use std::io;

use log::info;
use thiserror::Error;

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical or syntactic error. `location` is `at 'LEXEME'`, `at end`, or
    /// `at ''` for scanner errors which carry no lexeme.
    #[error("[Parse Error line at {line}] Error {location}: {message}")]
    Parse {
        line: usize,
        location: String,
        message: String,
    },

    /// Static-analysis failure from the resolver pass.
    #[error("[Resolution Error at line {line}] {message}")]
    Resolve { line: usize, message: String },

    /// Evaluation-time failure.
    #[error("[Runtime Error at line {line}] {message}")]
    Runtime { line: usize, message: String },

    /// Wrapper around `std::io::Error`. Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LoxError {
    /// Scanner-side parse error; the offending token has no lexeme yet.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating scanner error: line={}, msg={}", line, message);

        LoxError::Parse {
            line,
            location: "at ''".to_string(),
            message,
        }
    }

    /// Parser error anchored at `token`.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating parse error: line={}, lexeme={:?}, msg={}",
            token.line, token.lexeme, message
        );

        let location: String = if token.token_type == TokenType::EOF {
            "at end".to_string()
        } else {
            format!("at '{}'", token.lexeme)
        };

        LoxError::Parse {
            line: token.line,
            location,
            message,
        }
    }

    /// Resolver error anchored at `token`.
    pub fn resolve<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating resolution error: line={}, msg={}",
            token.line, message
        );

        LoxError::Resolve {
            line: token.line,
            message,
        }
    }

    /// Runtime error anchored at `token`.
    pub fn runtime<S: Into<String>>(token: &Token, msg: S) -> Self {
        LoxError::Runtime {
            line: token.line,
            message: msg.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;
