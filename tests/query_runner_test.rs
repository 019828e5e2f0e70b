//! Tests for loading category files and answering query files

use std::fs;
use std::path::{Path, PathBuf};

use categorytree::application::{
    load_category_file, ApplicationError, Limits, QueryOutcome, QueryRunner,
};
use categorytree::domain::{DomainError, QueryEngine};
use categorytree::util::testing;
use rstest::rstest;
use tempfile::TempDir;

fn create_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write file");
    path
}

fn rendered(outcomes: &[QueryOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter(|o| matches!(o, QueryOutcome::Answered(_)))
        .map(ToString::to_string)
        .collect()
}

// ============================================================
// Category data loading
// ============================================================

#[test]
fn given_missing_data_file_when_loading_then_fails_with_path_context() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.txt");

    let err = load_category_file(&path, &Limits::default()).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("missing.txt"));
}

#[test]
fn given_blank_data_file_when_loading_then_fails_with_empty_data() {
    let temp = TempDir::new().unwrap();
    let path = create_file(&temp, "data.txt", "\n   \n");

    let err = load_category_file(&path, &Limits::default()).unwrap_err();

    assert!(matches!(err, ApplicationError::EmptyData(p) if p == path));
}

#[test]
fn given_line_with_unknown_parent_when_loading_then_aborts_with_invalid_category() {
    let temp = TempDir::new().unwrap();
    let path = create_file(&temp, "data.txt", "Animal Mammal\nMammal Dog\nFish Shark\n");

    let err = load_category_file(&path, &Limits::default()).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidCategory(ref name)) if name == "Fish"
    ));
}

#[test]
fn given_parent_defined_later_when_loading_then_reference_before_definition_fails() {
    let temp = TempDir::new().unwrap();
    let path = create_file(&temp, "data.txt", "Animal Mammal\nDog Puppy\nMammal Dog\n");

    assert!(load_category_file(&path, &Limits::default()).is_err());
}

// ============================================================
// Query files
// ============================================================

#[test]
fn given_two_level_data_when_running_queries_then_prints_expected_lines() {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let data = create_file(&temp, "data.txt", "Animal Mammal Bird\nMammal Dog Cat\n");
    let queries = create_file(
        &temp,
        "queries.txt",
        "DirectSupercategory Dog\n\
         ClosestCommonSupercategory Dog Cat\n\
         ClosestCommonSupercategory Dog Bird\n\
         IsSupercategory Dog Animal\n\
         NumberOfAllSubcategories Animal\n\
         DirectSupercategory Fish\n",
    );
    let tree = load_category_file(&data, &Limits::default()).unwrap();
    let runner = QueryRunner::new(QueryEngine::new(&tree));

    let outcomes = runner.run_file(&queries).unwrap();

    assert_eq!(
        rendered(&outcomes),
        [
            "DirectSupercategory Dog Mammal",
            "ClosestCommonSupercategory Dog Cat Mammal",
            "ClosestCommonSupercategory Dog Bird Animal",
            "IsSupercategory Dog Animal yes",
            "NumberOfAllSubcategories Animal 4",
        ]
    );
    assert_eq!(outcomes.len(), 6);
    assert_eq!(
        outcomes[5].to_string(),
        "DirectSupercategory: given category (Fish) doesn't exist"
    );
}

#[test]
fn given_resource_queries_when_running_then_answers_every_known_operation() {
    let tree = load_category_file(
        Path::new("tests/resources/animals.txt"),
        &Limits::default(),
    )
    .unwrap();
    let runner = QueryRunner::new(QueryEngine::new(&tree));

    let outcomes = runner
        .run_file(Path::new("tests/resources/animals_queries.txt"))
        .unwrap();

    assert_eq!(
        rendered(&outcomes),
        [
            "DirectSupercategory Puppy Dog",
            "AllSupercategories Cobra Snake Reptile Animal",
            "NumberOfAllSupercategories Cobra 3",
            "IsSupercategory Beagle Mammal yes",
            "IsSubcategory Eagle Mammal no",
            "ClosestCommonSupercategory Puppy Whale Mammal",
            "DirectSubcategories Animal Bird Mammal Reptile",
            "AllSubcategories Mammal Cat Dog Beagle Puppy Whale",
            "NumberOfAllSubcategories Animal 13",
        ]
    );
    assert!(matches!(outcomes.last(), Some(QueryOutcome::Unrecognized(k)) if k == "Frobnicate"));
}

#[test]
fn given_missing_query_file_when_running_then_returns_io_error() {
    let temp = TempDir::new().unwrap();
    let data = create_file(&temp, "data.txt", "Animal Mammal\n");
    let tree = load_category_file(&data, &Limits::default()).unwrap();
    let runner = QueryRunner::new(QueryEngine::new(&tree));

    let err = runner.run_file(&temp.path().join("nope.txt")).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
}

#[rstest]
#[case("IsSubcategory Animal Animal", "IsSubcategory Animal Animal yes")]
#[case("IsSupercategory Animal Animal", "IsSupercategory Animal Animal yes")]
#[case(
    "ClosestCommonSupercategory Animal Mammal",
    "ClosestCommonSupercategory Animal Mammal Animal"
)]
#[case("AllSubcategories Mammal", "AllSubcategories Mammal")]
#[case("NumberOfAllSupercategories Animal", "NumberOfAllSupercategories Animal 0")]
fn given_edge_case_query_when_running_then_renders_line(
    #[case] query: &str,
    #[case] expected: &str,
) {
    let temp = TempDir::new().unwrap();
    let data = create_file(&temp, "data.txt", "Animal Mammal\n");
    let queries = create_file(&temp, "queries.txt", query);
    let tree = load_category_file(&data, &Limits::default()).unwrap();
    let runner = QueryRunner::new(QueryEngine::new(&tree));

    let outcomes = runner.run_file(&queries).unwrap();

    assert_eq!(rendered(&outcomes), [expected]);
}
