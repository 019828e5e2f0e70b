use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::application::{load_category_file, ApplicationError, QueryOutcome, QueryRunner};
use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{CategoryTree, QueryEngine};
use crate::tree_traits::TreeNodeConvert;

const USAGE: &str = "Usage: categorytree data_filename query_filename [query_filename...]";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    if cli.show_config {
        output::info(&settings.to_toml()?);
        return Ok(());
    }

    let data_file = cli
        .data_file
        .as_deref()
        .ok_or_else(|| CliError::Usage(USAGE.to_string()))?;
    if cli.query_files.is_empty() {
        return Err(CliError::Usage(USAGE.to_string()));
    }
    check_query_filenames(&cli.query_files, settings.max_filename_len)?;

    _answer(data_file, &cli.query_files, cli.tree, &settings)
}

/// Rejects query file names longer than `max_len` bytes, numbering files from 1.
pub fn check_query_filenames(files: &[PathBuf], max_len: usize) -> CliResult<()> {
    match files
        .iter()
        .position(|f| f.as_os_str().len() > max_len)
    {
        Some(i) => Err(CliError::InvalidArgs(format!(
            "filename of {}. query file is too long",
            i + 1
        ))),
        None => Ok(()),
    }
}

#[instrument(skip(settings))]
fn _answer(
    data_file: &Path,
    query_files: &[PathBuf],
    show_tree: bool,
    settings: &Settings,
) -> CliResult<()> {
    let tree = load_category_file(data_file, &settings.limits)?;
    info!("loaded {} categories from {}", tree.len(), data_file.display());

    if show_tree {
        write_tree(&mut io::stderr().lock(), data_file, &tree)
            .map_err(|e| write_failed("tree display", e))?;
    }

    let runner = QueryRunner::new(QueryEngine::new(&tree));
    for path in query_files {
        let outcomes = match runner.run_file(path) {
            Ok(outcomes) => outcomes,
            Err(e @ ApplicationError::OperationFailed { .. }) => {
                output::error(&e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        report(
            &outcomes,
            settings,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        )
        .map_err(|e| write_failed("query results", e))?;
    }
    Ok(())
}

fn write_failed(what: &str, e: io::Error) -> ApplicationError {
    ApplicationError::OperationFailed {
        context: format!("write {}", what),
        source: Box::new(e),
    }
}

/// Renders the loaded hierarchy under a header naming its data file.
pub fn write_tree<W: Write>(w: &mut W, data_file: &Path, tree: &CategoryTree) -> io::Result<()> {
    output::write_header(w, &format!("{}:", data_file.display()))?;
    output::write_info(w, &tree.to_tree_string())
}

/// Answers go to `out`; diagnostics go to `err`.
pub fn report<O: Write, E: Write>(
    outcomes: &[QueryOutcome],
    settings: &Settings,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    for outcome in outcomes {
        match outcome {
            QueryOutcome::Answered(_) => output::write_info(out, outcome)?,
            QueryOutcome::Rejected { .. } => output::write_error(err, outcome)?,
            QueryOutcome::Unrecognized(_) if settings.report_unknown_operations => {
                output::write_warning(err, outcome)?
            }
            QueryOutcome::Unrecognized(_) => {}
        }
    }
    Ok(())
}
