//! Hex reader that wraps any `std::io::Read` source.

use std::io::{self, Read};

use crate::codec::CodecError;

/// Wraps a `Read` source of hex text and yields the decoded bytes.
///
/// Newline characters are skipped wherever they appear. Upper and lower
/// case digits are both accepted. A digit left without a partner at the
/// end of the stream is an error.
///
/// # Example
///
/// ```
/// use std::io::{Cursor, Read};
/// use hexstream::reader::HexReader;
///
/// let mut reader = HexReader::new(Cursor::new("41\n42"));
/// let mut decoded = Vec::new();
/// reader.read_to_end(&mut decoded).unwrap();
/// assert_eq!(decoded, b"AB");
/// ```
pub struct HexReader<R> {
    reader: R,
    read_buffer: Vec<u8>,
    digit_buffer: Vec<u8>,
    pending: Option<u8>,
    digits_read: u64,
    eof: bool,
}

impl<R: Read> HexReader<R> {
    /// Create a new hex reader wrapping the given `Read` source.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, 4096)
    }

    /// Create a new hex reader with a specific read buffer size.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            reader,
            read_buffer: vec![0u8; capacity],
            digit_buffer: Vec::with_capacity(capacity + 1),
            pending: None,
            digits_read: 0,
            eof: false,
        }
    }

    /// Decode bytes into `out`, returning how many were written.
    ///
    /// Blocks until at least one byte is decoded or the stream ends;
    /// `Ok(0)` means end of stream.
    ///
    /// # Errors
    ///
    /// Returns `CodecError` if:
    /// - The underlying read fails
    /// - A character other than a hex digit or newline is found
    /// - The stream ends with an odd number of digits
    pub fn read_bytes(&mut self, out: &mut [u8]) -> Result<usize, CodecError> {
        if out.is_empty() {
            return Ok(0);
        }

        loop {
            if self.eof {
                return self.finish();
            }

            // Never pull more digits than `out` can hold once paired.
            let limit = (out.len() * 2 - 1).min(self.read_buffer.len());
            let bytes_read = match self.reader.read(&mut self.read_buffer[..limit]) {
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };

            if bytes_read == 0 {
                self.eof = true;
                continue;
            }

            let decoded = self.decode_chunk(bytes_read, out)?;
            if decoded > 0 {
                return Ok(decoded);
            }
            // Chunk held only newlines or a lone digit: keep reading.
        }
    }

    /// Number of hex digits consumed so far, not counting newlines.
    pub fn digits_read(&self) -> u64 {
        self.digits_read
    }

    fn decode_chunk(&mut self, bytes_read: usize, out: &mut [u8]) -> Result<usize, CodecError> {
        // Offset of the first digit in `digit_buffer` within the whole stream.
        let base = self.digits_read - self.pending.is_some() as u64;

        self.digit_buffer.clear();
        self.digit_buffer.extend(self.pending.take());
        self.digit_buffer.extend(
            self.read_buffer[..bytes_read]
                .iter()
                .copied()
                .filter(|&byte| byte != b'\n'),
        );
        self.digits_read = base + self.digit_buffer.len() as u64;

        let even = self.digit_buffer.len() & !1;
        if even < self.digit_buffer.len() {
            self.pending = Some(self.digit_buffer[even]);
        }

        let decoded = even / 2;
        hex::decode_to_slice(&self.digit_buffer[..even], &mut out[..decoded])
            .map_err(|err| digit_error(err, base, &self.digit_buffer))?;
        Ok(decoded)
    }

    fn finish(&mut self) -> Result<usize, CodecError> {
        match self.pending {
            None => Ok(0),
            Some(digit) if !digit.is_ascii_hexdigit() => Err(CodecError::InvalidDigit {
                digit: digit as char,
                offset: self.digits_read - 1,
            }),
            Some(_) => Err(CodecError::OddLength(self.digits_read)),
        }
    }
}

impl<R: Read> Read for HexReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_bytes(buf).map_err(io::Error::from)
    }
}

fn digit_error(err: hex::FromHexError, base: u64, digits: &[u8]) -> CodecError {
    match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => CodecError::InvalidDigit {
            digit: c,
            offset: base + index as u64,
        },
        // Only even-length prefixes with matching output are decoded.
        _ => CodecError::OddLength(base + digits.len() as u64),
    }
}
