use blocklingo::{LoadError, ParseError};
use thiserror::Error;

/// Error types for dropdown-aware translation
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Source text is not valid block notation
    #[error("Parse failed for {locale} code: {source}")]
    ParseFailure {
        locale: String,
        #[source]
        source: ParseError,
    },
    /// The requested locale has no loaded command table
    #[error("{0} language data not loaded")]
    VocabularyUnavailable(String),
    /// A vocabulary or mapping artifact could not be loaded at start-up
    #[error("Failed to load configuration: {0}")]
    ConfigLoadFailure(String),
    /// Direction token is not `{source}-to-{target}` with valid locale codes
    #[error("Invalid direction '{0}'. Use \"<source>-to-<target>\", e.g. \"en-to-ja\".")]
    InvalidDirection(String),
    /// Unknown dropdown strategy name
    #[error("Unknown strategy '{0}'. Use \"tree\" or \"pattern\".")]
    InvalidStrategy(String),
}

impl From<LoadError> for TranslateError {
    fn from(error: LoadError) -> Self {
        TranslateError::ConfigLoadFailure(error.to_string())
    }
}

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;
