//! Application layer: loading category data and running query files
//!
//! This layer drives the domain and owns all file access.

pub mod error;
pub mod error_ext;
pub mod loader;
pub mod runner;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use loader::{build_tree, load_category_file, parse_category_data, Limits};
pub use runner::{parse_query_line, ParsedLine, QueryOutcome, QueryRunner};
