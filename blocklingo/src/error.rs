use std::path::PathBuf;

use thiserror::Error;

/// Malformed block notation, positioned by 1-based line and character column
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unterminated '{0}'")]
    Unterminated(char),
    #[error("unexpected '{0}'")]
    UnexpectedClose(char),
}

/// Failure to load a vocabulary artifact
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse JSON from '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid vocabulary in '{}': {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
}
