//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::EmptyData(_)
                | ApplicationError::Parse { .. }
                | ApplicationError::Domain(DomainError::InvalidCategory(_)) => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::Domain(_) | ApplicationError::MissingOperands { .. } => {
                    crate::exitcode::SOFTWARE
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_invalid_category_when_mapping_exit_code_then_returns_dataerr() {
        let err = CliError::from(ApplicationError::from(DomainError::InvalidCategory(
            "Fish".into(),
        )));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(err.to_string(), "invalid category: Fish");
    }

    #[test]
    fn given_invalid_args_when_mapping_exit_code_then_returns_usage() {
        let err = CliError::InvalidArgs("filename of 1. query file is too long".into());
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }
}
