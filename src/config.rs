//! Command-line surface and its validation.

use clap::Parser;

use crate::codec::DEFAULT_LINE_LENGTH;

/// Convert binary data on stdin to base16 text on stdout, or back.
#[derive(Debug, Parser)]
#[command(name = "hexstream", version)]
pub struct Cli {
    /// Decode input (base16 to binary)
    #[arg(short = 'd')]
    pub decode: bool,

    /// Line length for encoded output (0 for no line breaks)
    #[arg(
        short = 'l',
        value_name = "N",
        default_value_t = DEFAULT_LINE_LENGTH as i64,
        allow_negative_numbers = true
    )]
    pub line_length: i64,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode { line_length: usize },
    Decode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub verbose: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("line length must be a non-negative integer (got {0})")]
    NegativeLineLength(i64),
}

impl Cli {
    /// Validate parsed arguments into a runnable configuration.
    ///
    /// The line length is only checked in encode mode, where it is used.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let mode = if self.decode {
            Mode::Decode
        } else {
            let line_length = usize::try_from(self.line_length)
                .map_err(|_| ConfigError::NegativeLineLength(self.line_length))?;
            Mode::Encode { line_length }
        };

        Ok(Config {
            mode,
            verbose: self.verbose,
        })
    }
}

/// True when the program was started with no arguments and nothing is
/// piped or redirected into stdin.
pub fn missing_input(arg_count: usize, stdin_is_terminal: bool) -> bool {
    arg_count <= 1 && stdin_is_terminal
}
