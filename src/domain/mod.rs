//! Domain layer: category tree, query entities and the query engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod query;

pub use arena::{CategoryNode, CategoryTree};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use query::QueryEngine;
