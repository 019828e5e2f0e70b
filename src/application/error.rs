//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, Operation};

/// Application errors wrap domain errors and add loading and query-line context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("no category data in: {0}")]
    EmptyData(PathBuf),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("expected {expected} operand(s), found {found}")]
    MissingOperands {
        operation: Operation,
        expected: usize,
        found: usize,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// Errors that only affect a single query line; the run continues after them.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ApplicationError::Domain(e) => !e.is_fatal(),
            ApplicationError::MissingOperands { .. } => true,
            _ => false,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
