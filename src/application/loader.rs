//! Category data loading
//!
//! The first non-empty line names the root followed by its direct children.
//! Every later line names an already known category followed by its children.

use std::fs;
use std::path::Path;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{CategoryRecord, CategoryTree, DomainError};

/// Optional size bounds for category data; `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Longest accepted category name in bytes
    pub max_name_len: Option<usize>,
    /// Longest accepted data line in bytes, excluding the line terminator
    pub max_line_len: Option<usize>,
}

/// Splits category data into records, skipping blank lines.
#[instrument(level = "debug", skip(content))]
pub fn parse_category_data(
    content: &str,
    limits: &Limits,
) -> ApplicationResult<Vec<CategoryRecord>> {
    let mut records = Vec::new();

    for (number, line) in content.lines().enumerate().map(|(i, l)| (i + 1, l)) {
        if let Some(max) = limits.max_line_len {
            if line.len() > max {
                return Err(ApplicationError::Parse {
                    line: number,
                    message: format!("line exceeds {} bytes", max),
                });
            }
        }

        let mut tokens = line.split_whitespace();
        let Some(parent) = tokens.next() else {
            continue;
        };
        let children: Vec<String> = tokens.map(str::to_string).collect();

        if let Some(max) = limits.max_name_len {
            let mut names = std::iter::once(parent).chain(children.iter().map(String::as_str));
            if let Some(long) = names.find(|name| name.len() > max) {
                return Err(ApplicationError::Parse {
                    line: number,
                    message: format!("category name exceeds {} bytes: {}", max, long),
                });
            }
        }

        records.push(CategoryRecord {
            parent: parent.to_string(),
            children,
        });
    }

    debug!("parsed {} records", records.len());
    Ok(records)
}

/// Builds the tree by feeding records to the tree in file order.
///
/// The first record fixes the root. A later record whose parent is not yet in the
/// tree aborts the load with [`DomainError::InvalidCategory`].
#[instrument(level = "debug", skip(records))]
pub fn build_tree(records: &[CategoryRecord]) -> ApplicationResult<CategoryTree> {
    let mut tree = CategoryTree::new();
    let (first, rest) = records.split_first().ok_or(DomainError::EmptyTree)?;

    let root = tree.create(&first.parent);
    tree.insert(None, root)?;
    add_children(&mut tree, root, &first.children)?;

    for record in rest {
        let parent = tree
            .find_from_root(&record.parent)
            .ok_or_else(|| DomainError::InvalidCategory(record.parent.clone()))?;
        add_children(&mut tree, parent, &record.children)?;
    }

    debug!("loaded {} categories", tree.len());
    Ok(tree)
}

fn add_children(
    tree: &mut CategoryTree,
    parent: Index,
    children: &[String],
) -> ApplicationResult<()> {
    for name in children {
        let child = tree.create(name);
        tree.insert(Some(parent), child)?;
    }
    Ok(())
}

/// Reads and loads a category data file.
///
/// Invalid UTF-8 is replaced rather than rejected.
#[instrument(level = "debug")]
pub fn load_category_file(path: &Path, limits: &Limits) -> ApplicationResult<CategoryTree> {
    let bytes = fs::read(path).with_path_context("read category data", path)?;
    let content = String::from_utf8_lossy(&bytes);
    let records = parse_category_data(&content, limits)?;
    if records.is_empty() {
        return Err(ApplicationError::EmptyData(path.to_path_buf()));
    }
    build_tree(&records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_data_with_blank_lines_when_parsing_then_skips_them() {
        let data = "\nAnimal Mammal Bird\n\n  \nMammal Dog\n";
        let records = parse_category_data(data, &Limits::default()).unwrap();

        assert_eq!(
            records,
            vec![
                CategoryRecord {
                    parent: "Animal".into(),
                    children: vec!["Mammal".into(), "Bird".into()],
                },
                CategoryRecord {
                    parent: "Mammal".into(),
                    children: vec!["Dog".into()],
                },
            ]
        );
    }

    #[test]
    fn given_name_limit_when_name_is_too_long_then_errors_with_line_number() {
        let limits = Limits {
            max_name_len: Some(5),
            max_line_len: None,
        };
        let err = parse_category_data("Root A\nA Toolong\n", &limits).unwrap_err();

        assert!(matches!(err, ApplicationError::Parse { line: 2, .. }));
    }

    #[test]
    fn given_line_limit_when_line_is_too_long_then_errors() {
        let limits = Limits {
            max_name_len: None,
            max_line_len: Some(8),
        };
        let err = parse_category_data("Root A B C D\n", &limits).unwrap_err();

        assert!(matches!(err, ApplicationError::Parse { line: 1, .. }));
    }

    #[test]
    fn given_unknown_parent_when_building_then_fails_with_invalid_category() {
        let data = "Animal Mammal\nFish Shark\n";
        let records = parse_category_data(data, &Limits::default()).unwrap();
        let err = build_tree(&records).unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidCategory(ref name)) if name == "Fish"
        ));
    }

    #[test]
    fn given_no_records_when_building_then_fails_with_empty_tree() {
        let err = build_tree(&[]).unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(DomainError::EmptyTree)));
    }

    #[test]
    fn given_root_only_line_when_building_then_tree_has_single_node() {
        let records = parse_category_data("Animal\n", &Limits::default()).unwrap();
        let tree = build_tree(&records).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().and_then(|r| tree.name(r)), Some("Animal"));
    }

    #[test]
    fn given_invalid_utf8_name_when_loading_file_then_other_categories_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, b"Animal Mammal Caf\xe9\nMammal Dog\n").unwrap();

        let tree = load_category_file(&path, &Limits::default()).unwrap();

        assert_eq!(tree.len(), 4);
        assert!(tree.find_from_root("Dog").is_some());
        assert!(tree.find_from_root("Caf\u{FFFD}").is_some());
    }
}
