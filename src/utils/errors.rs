use std::io;
use thiserror::Error;

use crate::ast::NodeKind;
use crate::pipeline::Phase;

/// Misuse of the node contracts while building or copying a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("cannot copy structure: expected a {expected} node, found {found}")]
    TypeMismatch { expected: NodeKind, found: NodeKind },

    #[error("{kind} node is already initialized")]
    AlreadyInitialized { kind: NodeKind },

    #[error("cursor name must not be empty")]
    InvalidCursorName,
}

/// Raised by a cursor registry when a positioned statement cannot find its row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorResolutionError {
    #[error("cursor '{0}' is not open")]
    NotOpen(String),

    #[error("cursor '{0}' is not positioned on a row")]
    NotPositioned(String),
}

#[derive(Error, Debug)]
pub enum SqlError {
    // File and I/O errors
    #[error("File read error: {0}")]
    FileReadError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    // Lexical analysis errors
    #[error("Lexer error at line {line}: {message}")]
    LexerError { message: String, line: usize },

    #[error("Unknown token '{token}' at line {line}")]
    UnknownToken { token: char, line: usize },

    #[error("Unterminated string literal at line {line}")]
    UnterminatedString { line: usize },

    #[error("Invalid number '{number}' at line {line}")]
    InvalidNumber { number: String, line: usize },

    // Parsing errors
    #[error("Syntax error at line {line}: expected '{expected}', found '{found}'")]
    SyntaxError {
        expected: String,
        found: String,
        line: usize,
    },

    #[error("Unsupported statement at line {line}: {found}")]
    UnsupportedStatement { found: String, line: usize },

    #[error("Duplicate table property '{name}' at line {line}")]
    DuplicateProperty { name: String, line: usize },

    // Node model errors
    #[error("Structural error: {0}")]
    Structural(#[from] StructuralError),

    #[error("Cursor resolution failed: {0}")]
    CursorResolution(#[from] CursorResolutionError),

    #[error("Illegal pipeline transition from {from} to {to}")]
    IllegalTransition { from: Phase, to: Phase },
}

impl SqlError {
    /// Create a lexer error with line information
    pub fn lexer_error(message: impl Into<String>, line: usize) -> Self {
        SqlError::LexerError {
            message: message.into(),
            line,
        }
    }

    /// Create a syntax error
    pub fn syntax_error(expected: impl Into<String>, found: impl Into<String>, line: usize) -> Self {
        SqlError::SyntaxError {
            expected: expected.into(),
            found: found.into(),
            line,
        }
    }

    /// True for run-time failures that abort one statement but leave the session usable.
    pub fn is_statement_local(&self) -> bool {
        matches!(self, SqlError::CursorResolution(_))
    }
}

// Type alias for Result with SqlError
pub type SqlResult<T> = Result<T, SqlError>;
