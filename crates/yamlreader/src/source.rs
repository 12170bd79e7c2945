//! Raw input sources and incremental UTF-8 decoding.
//!
//! A reader owns exactly one [`RawSource`] for its whole life. In-memory text
//! is materialized up front; byte blobs and handles hand out undecoded bytes
//! on demand, and [`decode_window`] turns the front of those bytes into text.

use core::fmt;
use std::io::{self, Read};

use bstr::ByteSlice;

/// Bytes requested per handle read when no chunk size is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Longest UTF-8 sequence; blob windows never shrink below this so the
/// first character of a window always fits.
const MAX_UTF8_LEN: usize = 4;

/// Encoding label reported in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// Input arrived as already decoded text.
    Unicode,
    /// Input arrived as UTF-8 bytes.
    Utf8,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::Unicode => "unicode",
            Encoding::Utf8 => "utf-8",
        })
    }
}

/// What a [`Reader`](crate::Reader) is constructed from.
pub enum Input<'a> {
    /// Decoded text, validated in full at construction.
    Text(&'a str),
    /// A UTF-8 byte blob, decoded lazily.
    Bytes(&'a [u8]),
    /// A readable stream, read in chunks and decoded lazily.
    Handle(Box<dyn Read + 'a>),
}

impl Input<'_> {
    /// Name used in diagnostics unless overridden by the options.
    #[must_use]
    pub fn default_name(&self) -> &'static str {
        match self {
            Input::Text(_) => "<unicode string>",
            Input::Bytes(_) => "<buffer>",
            Input::Handle(_) => "<file>",
        }
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.as_bstr()).finish(),
            Input::Handle(_) => f.write_str("Handle(..)"),
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Input::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Input::Bytes(bytes)
    }
}

/// Undecoded input plus whatever state is needed to get more of it.
pub(crate) enum RawSource<'a> {
    Text,
    Bytes {
        data: &'a [u8],
        offset: usize,
    },
    Handle {
        reader: Box<dyn Read + 'a>,
        pending: Vec<u8>,
        stream_pointer: u64,
        eof: bool,
    },
}

impl fmt::Debug for RawSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawSource::Text => f.write_str("Text"),
            RawSource::Bytes { data, offset } => f
                .debug_struct("Bytes")
                .field("pending", &data[*offset..].as_bstr())
                .finish(),
            RawSource::Handle {
                pending,
                stream_pointer,
                eof,
                ..
            } => f
                .debug_struct("Handle")
                .field("pending", &pending.as_bstr())
                .field("stream_pointer", stream_pointer)
                .field("eof", eof)
                .finish_non_exhaustive(),
        }
    }
}

impl<'a> RawSource<'a> {
    pub(crate) fn bytes(data: &'a [u8]) -> Self {
        RawSource::Bytes { data, offset: 0 }
    }

    pub(crate) fn handle(reader: Box<dyn Read + 'a>) -> Self {
        RawSource::Handle {
            reader,
            pending: Vec::new(),
            stream_pointer: 0,
            eof: false,
        }
    }

    pub(crate) fn encoding(&self) -> Encoding {
        match self {
            RawSource::Text => Encoding::Unicode,
            RawSource::Bytes { .. } | RawSource::Handle { .. } => Encoding::Utf8,
        }
    }

    pub(crate) fn is_handle(&self) -> bool {
        matches!(self, RawSource::Handle { .. })
    }

    /// Raw bytes taken from the source so far.
    pub(crate) fn stream_offset(&self) -> u64 {
        match self {
            RawSource::Text => 0,
            RawSource::Bytes { offset, .. } => *offset as u64,
            RawSource::Handle { stream_pointer, .. } => *stream_pointer,
        }
    }

    /// Reads one more chunk from a handle into the pending bytes.
    ///
    /// Returns the number of bytes read. A zero-length read marks the handle
    /// exhausted and it is never read again. In-memory sources have nothing
    /// to pull.
    pub(crate) fn pull(&mut self, chunk_size: usize) -> io::Result<usize> {
        let RawSource::Handle {
            reader,
            pending,
            stream_pointer,
            eof,
        } = self
        else {
            return Ok(0);
        };
        if *eof {
            return Ok(0);
        }

        let start = pending.len();
        pending.resize(start + chunk_size, 0);
        let count = loop {
            match reader.read(&mut pending[start..]) {
                Ok(count) => break count,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    pending.truncate(start);
                    return Err(err);
                }
            }
        };
        pending.truncate(start + count);
        *stream_pointer += count as u64;
        if count == 0 {
            *eof = true;
        }
        Ok(count)
    }

    /// The bytes to decode next, and whether nothing follows them.
    pub(crate) fn window(&self, chunk_size: usize) -> (&[u8], bool) {
        match self {
            RawSource::Text => (&[] as &[u8], true),
            RawSource::Bytes { data, offset } => {
                let rest = &data[*offset..];
                let take = rest.len().min(chunk_size.max(MAX_UTF8_LEN));
                (&rest[..take], take == rest.len())
            }
            RawSource::Handle { pending, eof, .. } => (pending.as_slice(), *eof),
        }
    }

    /// Drops `count` decoded bytes from the front of the pending input.
    pub(crate) fn consume(&mut self, count: usize) {
        match self {
            RawSource::Text => {}
            RawSource::Bytes { offset, .. } => *offset += count,
            RawSource::Handle { pending, .. } => {
                pending.drain(..count);
            }
        }
    }

    /// Whether every raw byte has been decoded and no more can arrive.
    pub(crate) fn is_drained(&self) -> bool {
        match self {
            RawSource::Text => true,
            RawSource::Bytes { data, offset } => *offset >= data.len(),
            RawSource::Handle { pending, eof, .. } => *eof && pending.is_empty(),
        }
    }

    /// Releases pending bytes once the sentinel is in place.
    pub(crate) fn clear(&mut self) {
        match self {
            RawSource::Text => {}
            RawSource::Bytes { data, offset } => *offset = data.len(),
            RawSource::Handle { pending, .. } => {
                pending.clear();
                pending.shrink_to_fit();
            }
        }
    }
}

/// Bytes that could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Malformed {
    /// First offending byte.
    pub(crate) byte: u8,
    /// The input ended in the middle of a sequence.
    pub(crate) truncated: bool,
}

impl Malformed {
    pub(crate) fn reason(self) -> &'static str {
        if self.truncated {
            "truncated utf-8 sequence"
        } else {
            "invalid utf-8 sequence"
        }
    }
}

/// Decodes the longest valid UTF-8 prefix of `bytes`.
///
/// An incomplete sequence at the very end is left undecoded unless `at_end`
/// says no more bytes will follow, in which case it is reported as truncated.
/// Any other invalid sequence is reported after the valid text before it.
pub(crate) fn decode_window(bytes: &[u8], at_end: bool) -> (&str, Option<Malformed>) {
    // `[u8]` has an inherent `utf8_chunks` without `incomplete()`; use bstr's.
    let Some(chunk) = ByteSlice::utf8_chunks(bytes).next() else {
        return ("", None);
    };
    let valid = chunk.valid();
    let Some(&byte) = chunk.invalid().first() else {
        return (valid, None);
    };
    if chunk.incomplete() && !at_end {
        return (valid, None);
    }
    (
        valid,
        Some(Malformed {
            byte,
            truncated: chunk.incomplete(),
        }),
    )
}
