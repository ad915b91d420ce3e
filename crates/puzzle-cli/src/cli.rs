//! Command-line arguments.

use clap::{ArgGroup, Parser, ValueEnum};
use puzzle_core::{OutputMode, SearchMode};
use std::path::PathBuf;

/// Solve a colored-button maze read from a file or standard input.
#[derive(Debug, Parser)]
#[command(name = "puzzle", version, about)]
#[command(group(ArgGroup::new("search").required(true).args(["queue", "stack"])))]
pub struct Cli {
    /// Search with a queue (breadth-first, shortest path)
    #[arg(short, long)]
    pub queue: bool,

    /// Search with a stack (depth-first)
    #[arg(short, long)]
    pub stack: bool,

    /// Output type
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Map)]
    pub output: OutputFormat,

    /// Puzzle file; standard input is read when omitted
    pub input: Option<PathBuf>,
}

/// Output type accepted by `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One annotated grid per color
    Map,
    /// Path states, one per line
    List,
    /// JSON summary of the search
    Json,
}

impl OutputFormat {
    /// Text rendering for this format, `None` for JSON.
    pub fn text_mode(self) -> Option<OutputMode> {
        match self {
            OutputFormat::Map => Some(OutputMode::Map),
            OutputFormat::List => Some(OutputMode::List),
            OutputFormat::Json => None,
        }
    }
}

/// Parsed-once run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleOptions {
    pub search_mode: SearchMode,
    pub output: OutputFormat,
    pub input: Option<PathBuf>,
}

impl From<Cli> for PuzzleOptions {
    fn from(cli: Cli) -> Self {
        // the argument group guarantees exactly one of the two flags
        let search_mode = if cli.stack {
            SearchMode::Stack
        } else {
            SearchMode::Queue
        };
        Self {
            search_mode,
            output: cli.output,
            input: cli.input,
        }
    }
}
