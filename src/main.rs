//! hexstream - base16 encode/decode between stdin and stdout.

use std::io::{self, BufWriter, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use hexstream::{Cli, Config, Mode};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    if hexstream::missing_input(std::env::args_os().len(), io::stdin().is_terminal()) {
        eprintln!("No arguments provided. Exiting...");
        return ExitCode::FAILURE;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and are not failures.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    init_logging(&config);

    let stdin = io::stdin().lock();
    let mut stdout = BufWriter::new(io::stdout().lock());

    match config.mode {
        Mode::Encode { line_length } => {
            tracing::debug!(line_length, "encoding stdin");
            hexstream::encode(stdin, &mut stdout, line_length).context("error encoding")?;
        }
        Mode::Decode => {
            tracing::debug!("decoding stdin");
            hexstream::decode(stdin, &mut stdout).context("error decoding")?;
        }
    }

    stdout
        .write_all(b"\n")
        .and_then(|()| stdout.flush())
        .context("error writing output")?;
    Ok(())
}

/// Logs go to stderr; stdout carries data.
fn init_logging(config: &Config) {
    let filter = if config.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
