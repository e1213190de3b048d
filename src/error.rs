use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single fact or rule line was rejected. Never fatal for the file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{expected} expected instead of '{found}'")]
    TokenMismatch { expected: String, found: String },

    #[error("identifier expected instead of '{found}'")]
    InvalidIdentifier { found: String },

    #[error("{expected} expected instead of 'end-of-line'")]
    PrematureEndOfLine { expected: String },

    #[error("conclusion variable(s) {} not bound by the condition", .variables.join(", "))]
    UnboundVariables { variables: Vec<String> },

    #[error("facts must be ground, found variable(s) {}", .variables.join(", "))]
    NonGroundFact { variables: Vec<String> },
}

/// A rejected line, displayed as `<file>, line <n>: <message>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{file}, line {line}: {error}")]
pub struct LineError {
    pub file: String,
    /// 1-based.
    pub line: usize,
    pub error: ParseError,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no fixpoint after {passes} passes")]
    PassLimit { passes: u32 },
}
