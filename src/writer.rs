//! Hex writer that wraps any `std::io::Write` sink.

use std::io::{self, Write};

/// Wraps a `Write` sink and writes every byte it is given as two
/// lowercase hex digits, breaking lines as it goes.
///
/// A newline goes in front of a byte's digit pair whenever the count of
/// digits already written is non-zero and a multiple of the line length.
/// Since digits arrive in pairs, an odd line length only breaks every
/// `2 * line_length` digits. A line length of `0` never breaks. No newline
/// is written after the last pair.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use hexstream::writer::HexWriter;
///
/// let mut out = Vec::new();
/// let mut writer = HexWriter::new(&mut out, 2);
/// writer.write_all(b"AB").unwrap();
/// writer.flush().unwrap();
/// assert_eq!(out, b"41\n42");
/// ```
pub struct HexWriter<W> {
    writer: W,
    bytes_per_line: usize,
    bytes_written: u64,
    encode_buffer: Vec<u8>,
}

impl<W: Write> HexWriter<W> {
    /// Create a new hex writer wrapping the given `Write` sink.
    pub fn new(writer: W, line_length: usize) -> Self {
        Self::with_capacity(writer, line_length, 1024)
    }

    /// Create a new hex writer with a specific encode buffer capacity.
    pub fn with_capacity(writer: W, line_length: usize, capacity: usize) -> Self {
        let bytes_per_line = if line_length % 2 == 0 {
            line_length / 2
        } else {
            line_length
        };
        Self {
            writer,
            bytes_per_line,
            bytes_written: 0,
            encode_buffer: Vec::with_capacity(capacity),
        }
    }

    /// Encode `bytes` and write the resulting text to the sink.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if the underlying write fails.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }

        self.encode_buffer.clear();
        let mut rest = bytes;
        while !rest.is_empty() {
            let take = if self.bytes_per_line == 0 {
                rest.len()
            } else {
                let column = (self.bytes_written % self.bytes_per_line as u64) as usize;
                if column == 0 && self.bytes_written > 0 {
                    self.encode_buffer.push(b'\n');
                }
                rest.len().min(self.bytes_per_line - column)
            };

            let (segment, tail) = rest.split_at(take);
            let start = self.encode_buffer.len();
            self.encode_buffer.resize(start + segment.len() * 2, 0);
            hex::encode_to_slice(segment, &mut self.encode_buffer[start..])
                .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

            self.bytes_written += take as u64;
            rest = tail;
        }

        self.writer.write_all(&self.encode_buffer)
    }

    /// Number of hex digits written so far, not counting newlines.
    pub fn digits_written(&self) -> u64 {
        self.bytes_written * 2
    }

    /// Access the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap and return the underlying writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> Write for HexWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapped(input: &[u8], line_length: usize) -> String {
        let mut writer = HexWriter::new(Vec::new(), line_length);
        writer.write_bytes(input).unwrap();
        String::from_utf8(writer.into_writer()).unwrap()
    }

    #[test]
    fn writes_without_wrapping() {
        assert_eq!(wrapped(b"hello", 0), "68656c6c6f");
    }

    #[test]
    fn wraps_even_line_length() {
        assert_eq!(wrapped(b"hello", 4), "6865\n6c6c\n6f");
    }

    #[test]
    fn odd_line_length_breaks_on_pair_boundaries() {
        // Digit counts 0, 2, 4, 6: only 6 is a non-zero multiple of 3.
        assert_eq!(wrapped(&[1, 2, 3, 4, 5], 3), "010203\n0405");
        assert_eq!(wrapped(&[1, 2, 3], 1), "01\n02\n03");
    }

    #[test]
    fn no_newline_after_full_line() {
        assert_eq!(wrapped(b"AB", 4), "4142");
    }

    #[test]
    fn keeps_column_across_writes() {
        let mut writer = HexWriter::new(Vec::new(), 6);
        for byte in b"abcdefg" {
            writer.write_bytes(&[*byte]).unwrap();
        }
        assert_eq!(writer.digits_written(), 14);
        let out = String::from_utf8(writer.into_writer()).unwrap();
        assert_eq!(out, "616263\n646566\n67");
    }

    #[test]
    fn empty_write_emits_nothing() {
        let mut writer = HexWriter::new(Vec::new(), 2);
        writer.write_bytes(b"A").unwrap();
        writer.write_bytes(b"").unwrap();
        writer.write_bytes(b"B").unwrap();
        assert_eq!(writer.get_ref().as_slice(), b"41\n42");
    }

    #[test]
    fn implements_write() {
        let mut buf = Vec::new();
        {
            let mut writer = HexWriter::new(&mut buf, 0);
            let n = writer.write(&[0x00, 0xFF]).unwrap();
            assert_eq!(n, 2);
            writer.flush().unwrap();
        }
        assert_eq!(buf, b"00ff");
    }
}
