//! Runs one puzzle from input to printed result.

use crate::cli::{OutputFormat, PuzzleOptions};
use puzzle_core::{
    render_list, render_map, render_no_solution, GridError, OutputMode, PuzzleMap, SearchError,
    Solver,
};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Everything that makes the binary exit with a failure status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("internal error: {0}")]
    Search(#[from] SearchError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// The configured input: the named file, or standard input.
pub fn open_input(options: &PuzzleOptions) -> Result<Box<dyn Read>, AppError> {
    match &options.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| AppError::Open {
                path: path.clone(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Parse, solve and print one puzzle.
pub fn run<R: Read, W: Write>(
    options: &PuzzleOptions,
    input: R,
    out: &mut W,
) -> Result<(), AppError> {
    let map = PuzzleMap::from_reader(input)?;
    info!(
        colors = map.num_colors(),
        height = map.height(),
        width = map.width(),
        "puzzle loaded"
    );

    let search = Solver::new(options.search_mode).solve(&map)?;
    info!(
        solved = search.is_solved(),
        discovered = search.stats.discovered,
        mode = %options.search_mode,
        "search finished"
    );

    match options.output.text_mode() {
        None => {
            let report = search.report(&map)?;
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        Some(mode) => match search.path(&map)? {
            Some(path) => match mode {
                OutputMode::List => render_list(out, &path)?,
                OutputMode::Map => render_map(out, &map, &search.backtrace, &path)?,
            },
            None => render_no_solution(out, &map, &search.backtrace)?,
        },
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_core::SearchMode;

    fn options(search_mode: SearchMode, output: OutputFormat) -> PuzzleOptions {
        PuzzleOptions {
            search_mode,
            output,
            input: None,
        }
    }

    fn run_to_string(options: &PuzzleOptions, input: &str) -> Result<String, AppError> {
        let mut out = Vec::new();
        run(options, input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    const DOOR_PUZZLE: &str = "1 3 4\n// press a to open A\n@.a.\n##A#\n...?\n";

    #[test]
    fn test_list_output() {
        let text =
            run_to_string(&options(SearchMode::Queue, OutputFormat::List), "0 1 3\n@.?\n").unwrap();
        assert_eq!(text, "(^, (0, 0))\n(^, (0, 1))\n(^, (0, 2))\n");
    }

    #[test]
    fn test_map_output() {
        let text =
            run_to_string(&options(SearchMode::Queue, OutputFormat::Map), DOOR_PUZZLE).unwrap();
        assert!(text.starts_with("// color ^\n@+%.\n"));
        assert!(text.contains("// color a\n..@.\n##+#\n..+?\n"));
    }

    #[test]
    fn test_stack_output_is_a_valid_list() {
        let text =
            run_to_string(&options(SearchMode::Stack, OutputFormat::List), DOOR_PUZZLE).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.first(), Some(&"(^, (0, 0))"));
        assert_eq!(lines.last(), Some(&"(a, (2, 3))"));
        assert!(lines.contains(&"(a, (0, 2))"));
    }

    #[test]
    fn test_no_solution_is_not_an_error() {
        let text =
            run_to_string(&options(SearchMode::Queue, OutputFormat::List), "0 1 3\n@#?\n").unwrap();
        assert_eq!(text, "No solution.\nDiscovered:\n@##\n");
    }

    #[test]
    fn test_json_output() {
        let text =
            run_to_string(&options(SearchMode::Queue, OutputFormat::Json), DOOR_PUZZLE).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["solved"], true);
        assert_eq!(value["mode"], "queue");
        assert_eq!(value["path"].as_array().map(Vec::len), Some(7));
        assert_eq!(value["path"][3]["color"], 1);
    }

    #[test]
    fn test_invalid_input_is_reported() {
        let err = run_to_string(&options(SearchMode::Queue, OutputFormat::Map), "0 1 3\n@x?\n")
            .unwrap_err();
        assert!(matches!(err, AppError::Grid(GridError::InvalidChar { ch: 'x', .. })));
        assert_eq!(err.to_string(), "invalid char 'x' in line @x?");
    }

    #[test]
    fn test_missing_file() {
        let options = PuzzleOptions {
            input: Some(PathBuf::from("/nonexistent/puzzle.txt")),
            ..options(SearchMode::Queue, OutputFormat::Map)
        };
        let err = open_input(&options).err().unwrap();
        assert!(matches!(err, AppError::Open { .. }));
    }
}
