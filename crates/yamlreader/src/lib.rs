//! An incremental character reader for YAML scanners.
//!
//! [`Reader`] sits between raw input and a grammar-level scanner. It accepts
//! decoded text, a UTF-8 byte blob, or any [`std::io::Read`] handle, decodes
//! lazily, rejects characters outside the YAML printable set, and keeps
//! `index/line/column` for diagnostics.
//!
//! ```rust
//! use yamlreader::{Reader, SENTINEL};
//!
//! let mut reader = Reader::from_read(&b"- item\r\n"[..]).unwrap();
//! assert_eq!(reader.prefix(2).unwrap(), "- ");
//! reader.forward(8).unwrap();
//! assert_eq!(reader.line(), 1);
//! assert_eq!(reader.peek(0).unwrap(), SENTINEL);
//! ```

mod buffer;
mod error;
mod mark;
mod options;
mod position;
mod printable;
mod reader;
mod source;


pub use buffer::SENTINEL;
pub use error::{Error, ReaderError, Result, Unacceptable};
pub use mark::Mark;
pub use options::ReaderOptions;
pub use position::{Position, is_line_break};
pub use printable::{NON_PRINTABLE_REASON, PRINTABLE_RANGES, find_non_printable, is_printable};
pub use reader::Reader;
pub use source::{DEFAULT_CHUNK_SIZE, Encoding, Input};
