//! Category hierarchy built from flat text, with ancestry and descendant queries.
//!
//! Layers, from the inside out:
//! - [`domain`]: arena-backed [`domain::CategoryTree`] and the [`domain::QueryEngine`]
//! - [`application`]: category data loading and query file processing
//! - [`cli`]: argument parsing, command execution and terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use application::{ApplicationError, ApplicationResult};
pub use domain::{CategoryTree, DomainError, QueryEngine};
