use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    NotFound(String),
    ValidationError(String),
    ConfigError(String),
    /// The sheet could not be fetched (network error or non-success status).
    SourceUnavailable(String),
    /// Non-empty input produced no records.
    MalformedDocument(String),
    /// The markdown capability failed; callers fall back to escaped text.
    MarkdownRender(String),
    /// A load is already in flight.
    Busy(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::SourceUnavailable(msg) => write!(f, "Source unavailable: {}", msg),
            AppError::MalformedDocument(msg) => write!(f, "Malformed document: {}", msg),
            AppError::MarkdownRender(msg) => write!(f, "Markdown render error: {}", msg),
            AppError::Busy(msg) => write!(f, "Busy: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = AppError::SourceUnavailable("status 404".to_string());
        assert_eq!(err.to_string(), "Source unavailable: status 404");

        let err = AppError::MalformedDocument("no records".to_string());
        assert_eq!(err.to_string(), "Malformed document: no records");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::IoError(msg) if msg == "missing"));
    }
}
