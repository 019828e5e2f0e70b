//! Domain entities: parsed data records, queries and their answers

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

/// One line of category data: a parent and its direct children, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub parent: String,
    pub children: Vec<String>,
}

/// The fixed set of questions the engine answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    DirectSupercategory,
    AllSupercategories,
    NumberOfAllSupercategories,
    IsSupercategory,
    IsSubcategory,
    ClosestCommonSupercategory,
    DirectSubcategories,
    AllSubcategories,
    NumberOfAllSubcategories,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::DirectSupercategory,
        Operation::AllSupercategories,
        Operation::NumberOfAllSupercategories,
        Operation::IsSupercategory,
        Operation::IsSubcategory,
        Operation::ClosestCommonSupercategory,
        Operation::DirectSubcategories,
        Operation::AllSubcategories,
        Operation::NumberOfAllSubcategories,
    ];

    /// Keyword as it appears in query files.
    pub fn keyword(self) -> &'static str {
        match self {
            Operation::DirectSupercategory => "DirectSupercategory",
            Operation::AllSupercategories => "AllSupercategories",
            Operation::NumberOfAllSupercategories => "NumberOfAllSupercategories",
            Operation::IsSupercategory => "IsSupercategory",
            Operation::IsSubcategory => "IsSubcategory",
            Operation::ClosestCommonSupercategory => "ClosestCommonSupercategory",
            Operation::DirectSubcategories => "DirectSubcategories",
            Operation::AllSubcategories => "AllSubcategories",
            Operation::NumberOfAllSubcategories => "NumberOfAllSubcategories",
        }
    }

    /// Number of category operands the operation consumes.
    pub fn arity(self) -> usize {
        match self {
            Operation::IsSupercategory
            | Operation::IsSubcategory
            | Operation::ClosestCommonSupercategory => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Keyword not naming any [`Operation`]; matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation: {}", self.0)
    }
}

impl std::error::Error for UnknownOperation {}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.keyword() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// A resolved query line. Holds exactly `operation.arity()` operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub operation: Operation,
    pub operands: Vec<String>,
}

impl Query {
    pub fn new(operation: Operation, operands: Vec<String>) -> Self {
        Self {
            operation,
            operands,
        }
    }

    pub fn first(&self) -> &str {
        self.operands.first().map(String::as_str).unwrap_or_default()
    }

    pub fn second(&self) -> &str {
        self.operands.get(1).map(String::as_str).unwrap_or_default()
    }
}

/// Computed result part of an output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Direct parent, None for the root
    Parent(Option<String>),
    Name(String),
    Names(Vec<String>),
    Count(usize),
    Verdict(bool),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Parent(None) => Ok(()),
            Answer::Parent(Some(name)) | Answer::Name(name) => f.write_str(name),
            Answer::Names(names) => write!(f, "{}", names.iter().join(" ")),
            Answer::Count(count) => write!(f, "{}", count),
            Answer::Verdict(true) => f.write_str("yes"),
            Answer::Verdict(false) => f.write_str("no"),
        }
    }
}

/// A query together with its answer; renders as one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub query: Query,
    pub answer: Answer,
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let answer = self.answer.to_string();
        let line = std::iter::once(self.query.operation.keyword())
            .chain(self.query.operands.iter().map(String::as_str))
            .chain((!answer.is_empty()).then_some(answer.as_str()))
            .join(" ");
        f.write_str(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("DirectSupercategory", Operation::DirectSupercategory, 1)]
    #[case("IsSupercategory", Operation::IsSupercategory, 2)]
    #[case("ClosestCommonSupercategory", Operation::ClosestCommonSupercategory, 2)]
    #[case("NumberOfAllSubcategories", Operation::NumberOfAllSubcategories, 1)]
    fn given_keyword_when_parsing_then_returns_operation(
        #[case] keyword: &str,
        #[case] expected: Operation,
        #[case] arity: usize,
    ) {
        let op: Operation = keyword.parse().unwrap();
        assert_eq!(op, expected);
        assert_eq!(op.arity(), arity);
        assert_eq!(op.to_string(), keyword);
    }

    #[rstest]
    #[case("directsupercategory")]
    #[case("Frobnicate")]
    #[case("")]
    fn given_unknown_keyword_when_parsing_then_errors(#[case] keyword: &str) {
        assert_eq!(
            keyword.parse::<Operation>(),
            Err(UnknownOperation(keyword.to_string()))
        );
    }

    #[test]
    fn given_root_parent_answer_when_rendering_then_line_has_no_trailing_result() {
        let response = Response {
            query: Query::new(Operation::DirectSupercategory, vec!["Animal".into()]),
            answer: Answer::Parent(None),
        };
        assert_eq!(response.to_string(), "DirectSupercategory Animal");
    }

    #[test]
    fn given_names_answer_when_rendering_then_names_are_space_separated() {
        let response = Response {
            query: Query::new(Operation::AllSupercategories, vec!["Dog".into()]),
            answer: Answer::Names(vec!["Mammal".into(), "Animal".into()]),
        };
        assert_eq!(response.to_string(), "AllSupercategories Dog Mammal Animal");
    }

    #[test]
    fn given_empty_names_answer_when_rendering_then_only_query_is_echoed() {
        let response = Response {
            query: Query::new(Operation::DirectSubcategories, vec!["Dog".into()]),
            answer: Answer::Names(vec![]),
        };
        assert_eq!(response.to_string(), "DirectSubcategories Dog");
    }

    #[test]
    fn given_verdict_answer_when_rendering_then_uses_yes_no() {
        let query = Query::new(
            Operation::IsSupercategory,
            vec!["Dog".into(), "Animal".into()],
        );
        let yes = Response {
            query: query.clone(),
            answer: Answer::Verdict(true),
        };
        let no = Response {
            query,
            answer: Answer::Verdict(false),
        };
        assert_eq!(yes.to_string(), "IsSupercategory Dog Animal yes");
        assert_eq!(no.to_string(), "IsSupercategory Dog Animal no");
    }
}
