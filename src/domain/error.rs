//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree structure or of a query.
/// These are independent of file handling and CLI concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("given category ({0}) doesn't exist")]
    CategoryNotFound(String),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("node is not part of this tree")]
    UnknownNode,

    #[error("category already attached: {0}")]
    AlreadyAttached(String),

    #[error("categories do not share a root: {first}, {second}")]
    DisjointHierarchy { first: String, second: String },

    #[error("category tree is empty")]
    EmptyTree,
}

impl DomainError {
    /// Errors that invalidate the whole tree rather than a single query.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DomainError::CategoryNotFound(_))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
