use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for cabinetry operations
#[derive(Error, Diagnostic, Debug)]
pub enum CabError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(cabinetry::io))]
    Io { path: PathBuf, message: String },

    #[error("No description.yaml found in {path}")]
    #[diagnostic(
        code(cabinetry::not_found),
        help("Each cabinet folder needs a description.yaml next to its artwork")
    )]
    NotFound { path: PathBuf },

    #[error("Parse error: {message}")]
    #[diagnostic(code(cabinetry::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(cabinetry::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl CabError {
    /// Build an `Io` error for `path` from any displayable cause.
    pub fn io(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        CabError::Io {
            path: path.into(),
            message: cause.to_string(),
        }
    }

    /// Whether this error means the cabinet has no description file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CabError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CabError>;
