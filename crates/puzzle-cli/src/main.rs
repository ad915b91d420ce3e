mod app;
mod cli;

use clap::Parser;
use cli::{Cli, PuzzleOptions};
use std::io::{self, BufWriter};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let options = PuzzleOptions::from(Cli::parse());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let result = app::open_input(&options).and_then(|input| {
        let mut out = BufWriter::new(io::stdout().lock());
        app::run(&options, input, &mut out)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
