//! Query runner: parses query lines and dispatches them to the engine
//!
//! A line is an operation keyword followed by category operands. Lines are
//! answered strictly in order; a failed lookup only drops that line.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Operation, Query, QueryEngine, Response};

/// Tokens of a non-blank query line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'l> {
    pub keyword: &'l str,
    pub operands: Vec<&'l str>,
}

/// Splits a query line on whitespace. Blank lines yield `None`.
pub fn parse_query_line(line: &str) -> Option<ParsedLine<'_>> {
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next()?;
    Some(ParsedLine {
        keyword,
        operands: tokens.collect(),
    })
}

/// Result of processing one non-blank query line.
#[derive(Debug)]
pub enum QueryOutcome {
    Answered(Response),
    Rejected {
        operation: Operation,
        error: ApplicationError,
    },
    /// Keyword did not name an operation
    Unrecognized(String),
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutcome::Answered(response) => write!(f, "{}", response),
            QueryOutcome::Rejected { operation, error } => write!(f, "{}: {}", operation, error),
            QueryOutcome::Unrecognized(keyword) => write!(f, "unknown operation: {}", keyword),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QueryRunner<'a> {
    engine: QueryEngine<'a>,
}

impl<'a> QueryRunner<'a> {
    pub fn new(engine: QueryEngine<'a>) -> Self {
        Self { engine }
    }

    /// Answers a single line. Blank lines yield `Ok(None)`.
    ///
    /// Per-line failures become [`QueryOutcome::Rejected`]; only errors that
    /// invalidate the tree itself are returned as `Err`.
    #[instrument(level = "debug", skip(self))]
    pub fn answer_line(&self, line: &str) -> ApplicationResult<Option<QueryOutcome>> {
        let Some(parsed) = parse_query_line(line) else {
            return Ok(None);
        };
        let operation = match parsed.keyword.parse::<Operation>() {
            Ok(operation) => operation,
            Err(_) => {
                debug!("skipping unknown operation: {}", parsed.keyword);
                return Ok(Some(QueryOutcome::Unrecognized(parsed.keyword.to_string())));
            }
        };

        let arity = operation.arity();
        if parsed.operands.len() < arity {
            return Ok(Some(QueryOutcome::Rejected {
                operation,
                error: ApplicationError::MissingOperands {
                    operation,
                    expected: arity,
                    found: parsed.operands.len(),
                },
            }));
        }
        if parsed.operands.len() > arity {
            debug!(
                "ignoring {} extra operand(s) for {}",
                parsed.operands.len() - arity,
                operation
            );
        }

        let operands = parsed.operands[..arity].iter().map(|s| s.to_string()).collect();
        let query = Query::new(operation, operands);
        match self.engine.answer(&query).map_err(ApplicationError::from) {
            Ok(answer) => Ok(Some(QueryOutcome::Answered(Response { query, answer }))),
            Err(error) if error.is_recoverable() => {
                Ok(Some(QueryOutcome::Rejected { operation, error }))
            }
            Err(error) => Err(error),
        }
    }

    /// Answers every line of `reader` in order.
    ///
    /// Lines are decoded lossily; invalid UTF-8 only affects the names on that line.
    pub fn run_reader<R: BufRead>(
        &self,
        mut reader: R,
    ) -> ApplicationResult<Vec<QueryOutcome>> {
        let mut outcomes = Vec::new();
        let mut buf = Vec::new();
        for number in 1.. {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| ApplicationError::OperationFailed {
                    context: format!("read query line {}", number),
                    source: Box::new(e),
                })?;
            if read == 0 {
                break;
            }
            outcomes.extend(self.answer_line(&String::from_utf8_lossy(&buf))?);
        }
        Ok(outcomes)
    }

    /// Opens and answers one query file.
    ///
    /// An unreadable file is returned as an error; the caller decides whether to
    /// skip it.
    #[instrument(level = "debug", skip(self))]
    pub fn run_file(&self, path: &Path) -> ApplicationResult<Vec<QueryOutcome>> {
        let file = File::open(path).with_path_context("open query file", path)?;
        let outcomes = self.run_reader(BufReader::new(file))?;
        let rejected = outcomes
            .iter()
            .filter(|o| matches!(o, QueryOutcome::Rejected { .. }))
            .count();
        if rejected > 0 {
            warn!("{}: {} query line(s) rejected", path.display(), rejected);
        }
        Ok(outcomes)
    }
}
