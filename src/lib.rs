pub mod codec;
pub mod config;

// Streaming adapters over std::io
pub mod reader;
pub mod writer;

pub use codec::{decode, encode, CodecError, BUFFER_SIZE, DEFAULT_LINE_LENGTH};
pub use config::{missing_input, Cli, Config, ConfigError, Mode};
pub use reader::HexReader;
pub use writer::HexWriter;
