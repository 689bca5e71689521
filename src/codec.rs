//! Stream-level encode and decode operations.

use std::io::{self, Read, Write};

use crate::reader::HexReader;
use crate::writer::HexWriter;

/// Line length used when none is given on the command line.
pub const DEFAULT_LINE_LENGTH: usize = 64;
/// Size of the working buffer owned by each encode/decode call.
pub const BUFFER_SIZE: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid hex digit {digit:?} at offset {offset}")]
    InvalidDigit { digit: char, offset: u64 },
    #[error("odd number of hex digits ({0})")]
    OddLength(u64),
}

impl CodecError {
    /// True for malformed input, false for failures of the underlying streams.
    pub fn is_format(&self) -> bool {
        !matches!(self, CodecError::Io(_))
    }
}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Io(inner) => inner,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

/// Encode everything readable from `input` as hex text into `output`.
///
/// A newline is inserted before every `line_length`-th hex character
/// boundary; `0` disables wrapping. Returns the number of bytes consumed.
pub fn encode<R, W>(mut input: R, output: W, line_length: usize) -> Result<u64, CodecError>
where
    R: Read,
    W: Write,
{
    let mut buf = [0u8; BUFFER_SIZE];
    let mut writer = HexWriter::with_capacity(output, line_length, BUFFER_SIZE * 2);
    let mut total = 0u64;

    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        tracing::trace!(bytes = n, "encoding chunk");
        writer.write_bytes(&buf[..n])?;
        total += n as u64;
    }

    writer.flush()?;
    tracing::debug!(
        bytes = total,
        digits = writer.digits_written(),
        line_length,
        "encode finished"
    );
    Ok(total)
}

/// Decode hex text from `input` into raw bytes on `output`, skipping newlines.
///
/// Returns the number of bytes written. On a format error, bytes decoded
/// from earlier chunks may already have reached `output`.
pub fn decode<R, W>(input: R, mut output: W) -> Result<u64, CodecError>
where
    R: Read,
    W: Write,
{
    let mut buf = [0u8; BUFFER_SIZE];
    let mut reader = HexReader::with_capacity(input, BUFFER_SIZE);
    let mut total = 0u64;

    loop {
        let n = reader.read_bytes(&mut buf)?;
        if n == 0 {
            break;
        }
        tracing::trace!(bytes = n, "decoded chunk");
        output.write_all(&buf[..n])?;
        total += n as u64;
    }

    output.flush()?;
    tracing::debug!(
        bytes = total,
        digits = reader.digits_read(),
        "decode finished"
    );
    Ok(total)
}
