//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Build a category hierarchy from a data file and answer queries against it
#[derive(Parser, Debug)]
#[command(name = "categorytree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Category data file
    #[arg(
        value_hint = ValueHint::FilePath,
        required_unless_present_any = ["completions", "show_config"]
    )]
    pub data_file: Option<PathBuf>,

    /// Query files, answered in the given order
    #[arg(
        value_hint = ValueHint::FilePath,
        required_unless_present_any = ["completions", "show_config"]
    )]
    pub query_files: Vec<PathBuf>,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Additional config file (overrides the global config)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print the loaded hierarchy before answering queries
    #[arg(long)]
    pub tree: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}
