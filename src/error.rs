use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum LoaderError {
    #[error("failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("malformed row at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid numeric value {value:?} for {column} at line {line}")]
    NumberFormat {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("data path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("storage write failed: {0}")]
    Storage(String),
}

impl LoaderError {
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        LoaderError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
