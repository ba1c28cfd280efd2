//! Error types for operations outside a compilation pass
//!
//! Problems inside a stylesheet (undefined variables, bad values, unknown
//! properties) are never errors in this sense; they are collected as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s and the walk continues.
//! `CartoError` covers the surrounding plumbing: loading the reference schema
//! or configuration, constructing nodes from malformed tokens, and stale arena
//! handles.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for carto-core
#[derive(Debug, Error)]
pub enum CartoError {
    /// The reference schema could not be parsed or is inconsistent
    #[error("Reference schema error: {message}")]
    SchemaError { message: String },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A filter was built with an operator outside the operator table
    #[error("Invalid filter operator: '{op}'")]
    InvalidOperator { op: String },

    /// An arena handle does not point into the style tree it was used with
    #[error("Unknown {kind} handle: {index}")]
    StaleHandle { kind: &'static str, index: usize },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Schema,
    Config,
    Syntax,
    Tree,
    Io,
    Internal,
}

impl CartoError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartoError::SchemaError { .. } | CartoError::Json(_) => ErrorKind::Schema,
            CartoError::ConfigError { .. } => ErrorKind::Config,
            CartoError::InvalidOperator { .. } => ErrorKind::Syntax,
            CartoError::StaleHandle { .. } => ErrorKind::Tree,
            CartoError::IoError { .. } => ErrorKind::Io,
            CartoError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (the caller may skip the offending
    /// input and keep going)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Syntax | ErrorKind::Tree)
    }

    /// Create a schema error
    pub fn schema_error(message: impl Into<String>) -> Self {
        Self::SchemaError {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an invalid operator error
    pub fn invalid_operator(op: impl Into<String>) -> Self {
        Self::InvalidOperator { op: op.into() }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CartoError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}
