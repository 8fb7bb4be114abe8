//! Единый тип ошибок публичного API.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("the file {} does not exist", .0.display())]
    InvalidInputPath(PathBuf),

    #[error("the language '{0}' is not supported")]
    UnsupportedLanguage(String),

    #[error("line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    #[error("XML error: {0}")]
    Xml(String),
}

impl ConvertError {
    /// csv::Error без позиции получает `fallback_line`.
    pub(crate) fn from_csv(e: csv::Error, fallback_line: u64) -> Self {
        let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
        let message = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(err) => ConvertError::Io(err),
            _ => ConvertError::MalformedRecord { line, message },
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
