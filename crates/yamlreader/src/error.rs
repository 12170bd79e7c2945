use core::fmt;

use thiserror::Error;

use crate::source::Encoding;

/// The thing the reader refused to admit into its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unacceptable {
    /// A decoded character outside the printable set.
    Char(char),
    /// A raw byte that does not start or continue a valid UTF-8 sequence.
    Byte(u8),
}

impl fmt::Display for Unacceptable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unacceptable::Char(ch) => {
                write!(f, "'{}' (U+{:04X})", ch.escape_default(), u32::from(*ch))
            }
            Unacceptable::Byte(b) => write!(f, "#x{b:02x}"),
        }
    }
}

/// Raised when input contains something a YAML stream may not carry.
///
/// `position` is the absolute character index of the offending character,
/// counted from the start of the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unacceptable character {character}: {reason}\n  in \"{name}\", position {position}")]
pub struct ReaderError {
    /// Source name, e.g. `<unicode string>`.
    pub name: String,
    /// Absolute character index of the offender.
    pub position: usize,
    /// The rejected character or byte.
    pub character: Unacceptable,
    /// Encoding in effect when the offender was found.
    pub encoding: Encoding,
    /// Fixed human-readable reason.
    pub reason: &'static str,
}

/// Every failure a [`Reader`](crate::Reader) operation can surface.
#[derive(Error, Debug)]
pub enum Error {
    /// The input contained a disallowed character or undecodable bytes.
    #[error(transparent)]
    Reader(#[from] ReaderError),
    /// The underlying handle failed; passed through untouched.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the reader error, if this is one.
    #[must_use]
    pub fn as_reader_error(&self) -> Option<&ReaderError> {
        match self {
            Error::Reader(err) => Some(err),
            Error::Io(_) => None,
        }
    }
}

/// Shorthand used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
