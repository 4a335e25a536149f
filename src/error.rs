//! Parse diagnostics.
//!
//! Exactly two recoverable parse-error kinds exist. Both carry a rendered,
//! human-readable message plus the 1-based line and column where the parser
//! stopped, and a labeled span for [`miette`] report rendering. Errors are
//! plain values: sub-parsers return them, they are never panics, and a
//! caller is free to pattern-match a failure as a loop terminator.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::stream::{char_width, Stream};

/// Why a parse failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// A character was read where the grammar required a different terminal,
    /// e.g. a stray `)` or trailing input after a complete expression.
    #[error("{message}")]
    #[diagnostic(code(sexp_stream::parse::unexpected_char))]
    UnexpectedChar {
        message: String,
        line: u32,
        column: u32,
        #[label("unexpected character")]
        span: SourceSpan,
    },

    /// Input ended before a grammar rule could close, e.g. inside a list
    /// still awaiting its `)`.
    #[error("{message}")]
    #[diagnostic(code(sexp_stream::parse::unexpected_eof))]
    UnexpectedEndOfInput {
        message: String,
        line: u32,
        column: u32,
        #[label("input ends here")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Builds a [`ParseError::UnexpectedChar`] at the stream's current
    /// cursor. `expected` names the terminal the grammar wanted, e.g. `"')'"`
    /// or `"end of input"`.
    pub fn unexpected_char(found: char, expected: &str, stream: &Stream<'_>) -> Self {
        let line = stream.line();
        let column = stream.column();
        ParseError::UnexpectedChar {
            message: format!(
                "unexpected character '{found}', expected {expected} at line {line}, column {column}"
            ),
            line,
            column,
            span: (stream.position(), char_width(found)).into(),
        }
    }

    /// Builds a [`ParseError::UnexpectedEndOfInput`] at the stream's current
    /// cursor.
    pub fn unexpected_end_of_input(expected: &str, stream: &Stream<'_>) -> Self {
        let line = stream.line();
        let column = stream.column();
        ParseError::UnexpectedEndOfInput {
            message: format!(
                "unexpected end of input, expected {expected} at line {line}, column {column}"
            ),
            line,
            column,
            span: (stream.position(), 0).into(),
        }
    }

    /// The rendered diagnostic message.
    pub fn message(&self) -> &str {
        match self {
            ParseError::UnexpectedChar { message, .. }
            | ParseError::UnexpectedEndOfInput { message, .. } => message,
        }
    }

    /// 1-based line where the parse stopped.
    pub fn line(&self) -> u32 {
        match self {
            ParseError::UnexpectedChar { line, .. }
            | ParseError::UnexpectedEndOfInput { line, .. } => *line,
        }
    }

    /// 1-based column where the parse stopped.
    pub fn column(&self) -> u32 {
        match self {
            ParseError::UnexpectedChar { column, .. }
            | ParseError::UnexpectedEndOfInput { column, .. } => *column,
        }
    }
}
