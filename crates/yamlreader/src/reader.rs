//! Reader: lookahead and consumption over a lazily decoded source.
//!
//! What it does
//! - Pulls raw bytes from its source only when lookahead needs them, decodes
//!   them as UTF-8 and validates the result against the printable set before
//!   any of it becomes visible.
//! - Keeps a window of decoded text and a pointer into it; the consumed
//!   prefix is dropped whenever the window has to grow.
//! - Tracks `index/line/column` as characters are consumed with
//!   [`Reader::forward`]. Lookahead never moves the position.
//!
//! Invariants
//! - Text in the buffer has been validated exactly once.
//! - Once the source is exhausted the buffer ends with a single
//!   [`SENTINEL`], and every read past the end yields it.
//! - After an error the reader is not meant to be used again.

use std::{io::Read, sync::Arc};

use crate::{
    Mark, Position, ReaderOptions,
    buffer::{Buffer, SENTINEL},
    error::{ReaderError, Result, Unacceptable},
    printable::check_printable,
    source::{Encoding, Input, RawSource, decode_window},
};

/// A character reader for YAML scanners.
///
/// ```rust
/// use yamlreader::Reader;
///
/// let mut reader = Reader::from_text("a: 1\nb: 2").unwrap();
/// assert_eq!(reader.prefix(2).unwrap(), "a:");
/// reader.forward(5).unwrap();
/// assert_eq!(reader.peek(0).unwrap(), 'b');
/// assert_eq!((reader.line(), reader.column()), (1, 0));
/// ```
#[derive(Debug)]
pub struct Reader<'a> {
    name: Arc<str>,
    source: RawSource<'a>,
    buffer: Buffer,
    position: Position,
    chunk_size: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader over `input`.
    ///
    /// Text is validated in full before this returns. Byte blobs and handles
    /// decode just enough to make the first character available.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reader`](crate::Error::Reader) if the text (or the
    /// first decoded chunk) holds a disallowed character, and
    /// [`Error::Io`](crate::Error::Io) if the first read from a handle fails.
    pub fn new(input: impl Into<Input<'a>>, options: ReaderOptions) -> Result<Self> {
        let input = input.into();
        let name: Arc<str> = match options.name {
            Some(name) => name.into(),
            None => input.default_name().into(),
        };
        let chunk_size = options.chunk_size.max(1);

        match input {
            Input::Text(text) => {
                check_printable(text, 0, &name, Encoding::Unicode)?;
                Ok(Self {
                    name,
                    source: RawSource::Text,
                    buffer: Buffer::terminated(text),
                    position: Position::default(),
                    chunk_size,
                })
            }
            Input::Bytes(bytes) => Self::lazy(name, RawSource::bytes(bytes), chunk_size),
            Input::Handle(reader) => Self::lazy(name, RawSource::handle(reader), chunk_size),
        }
    }

    fn lazy(name: Arc<str>, source: RawSource<'a>, chunk_size: usize) -> Result<Self> {
        let mut reader = Self {
            name,
            source,
            buffer: Buffer::new(),
            position: Position::default(),
            chunk_size,
        };
        reader.update(1)?;
        Ok(reader)
    }

    /// Reader over decoded text with default options.
    ///
    /// # Errors
    ///
    /// Fails if `text` holds a disallowed character.
    pub fn from_text(text: &'a str) -> Result<Self> {
        Self::new(Input::Text(text), ReaderOptions::default())
    }

    /// Reader over a UTF-8 byte blob with default options.
    ///
    /// # Errors
    ///
    /// Fails if the first decoded chunk is malformed or disallowed.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        Self::new(Input::Bytes(bytes), ReaderOptions::default())
    }

    /// Reader over a readable stream with default options.
    ///
    /// # Errors
    ///
    /// Fails if the first read fails or the first decoded chunk is malformed
    /// or disallowed.
    pub fn from_read(reader: impl Read + 'a) -> Result<Self> {
        Self::new(Input::Handle(Box::new(reader)), ReaderOptions::default())
    }

    /// The character `offset` places past the current one.
    ///
    /// Past the end of the input this is always [`SENTINEL`].
    ///
    /// # Errors
    ///
    /// Growing the buffer may decode new input, which can fail validation or
    /// hit an I/O error.
    pub fn peek(&mut self, offset: usize) -> Result<char> {
        if self.buffer.remaining() <= offset {
            self.update(offset.saturating_add(1))?;
        }
        Ok(self.buffer.get(offset).unwrap_or(SENTINEL))
    }

    /// Up to `length` characters starting at the current one, without
    /// consuming them.
    ///
    /// Near the end of the input the result is shorter; it includes the
    /// sentinel but nothing past it.
    ///
    /// # Errors
    ///
    /// As for [`peek`](Self::peek).
    pub fn prefix(&mut self, length: usize) -> Result<String> {
        if self.buffer.remaining() < length {
            self.update(length)?;
        }
        Ok(self.buffer.slice(length))
    }

    /// Consumes `length` characters, updating index, line and column.
    ///
    /// Consuming beyond the sentinel keeps counting, as if the sentinel
    /// repeated forever.
    ///
    /// # Errors
    ///
    /// As for [`peek`](Self::peek). One character past the consumed ones is
    /// loaded as well, to tell a lone carriage return from a CRLF pair.
    pub fn forward(&mut self, length: usize) -> Result<()> {
        if self.buffer.remaining() <= length {
            self.update(length.saturating_add(1))?;
        }
        for _ in 0..length {
            let ch = self.buffer.get(0).unwrap_or(SENTINEL);
            let next = self.buffer.get(1).unwrap_or(SENTINEL);
            self.buffer.advance(1);
            self.position.advance(ch, next);
        }
        Ok(())
    }

    /// Snapshot of the current position for diagnostics.
    ///
    /// In-memory sources include the resident buffer so the mark can render
    /// the current line; handles do not.
    #[must_use]
    pub fn get_mark(&self) -> Mark {
        if self.source.is_handle() {
            Mark::new(self.name.clone(), self.position, None, None)
        } else {
            Mark::new(
                self.name.clone(),
                self.position,
                Some(self.buffer.snapshot()),
                Some(self.buffer.pointer()),
            )
        }
    }

    /// Source name used in errors and marks.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encoding of the input.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.source.encoding()
    }

    /// Characters consumed so far.
    #[must_use]
    pub fn index(&self) -> usize {
        self.position.index
    }

    /// 0-based line of the current character.
    #[must_use]
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// 0-based column of the current character.
    #[must_use]
    pub fn column(&self) -> usize {
        self.position.column
    }

    /// Index, line and column together.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the whole input has been decoded and the sentinel appended.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.buffer.is_terminated()
    }

    /// Raw bytes taken from the source so far.
    ///
    /// Counts bytes read from a handle, or bytes decoded from a blob. Text
    /// inputs report zero.
    #[must_use]
    pub fn stream_offset(&self) -> u64 {
        self.source.stream_offset()
    }

    /// Makes at least `length` characters resident past the pointer, or
    /// exhausts the source trying.
    pub(crate) fn update(&mut self, length: usize) -> Result<()> {
        if self.buffer.is_terminated() {
            return Ok(());
        }
        self.buffer.compact();

        while self.buffer.remaining() < length {
            let pulled = self.source.pull(self.chunk_size)?;
            let start = self.position.index + self.buffer.remaining();
            let (window, at_end) = self.source.window(self.chunk_size);
            let (text, malformed) = decode_window(window, at_end);

            check_printable(text, start, &self.name, Encoding::Utf8)?;
            self.buffer.push_str(text);
            let decoded = text.len();

            if let Some(malformed) = malformed {
                let position = start + text.chars().count();
                tracing::debug!(
                    source = &*self.name,
                    position,
                    byte = malformed.byte,
                    "undecodable input"
                );
                return Err(ReaderError {
                    name: self.name.to_string(),
                    position,
                    character: Unacceptable::Byte(malformed.byte),
                    encoding: Encoding::Utf8,
                    reason: malformed.reason(),
                }
                .into());
            }
            self.source.consume(decoded);
            tracing::trace!(
                length,
                resident = self.buffer.remaining(),
                pulled,
                decoded,
                "buffer grown"
            );

            if self.source.is_drained() {
                self.source.clear();
                self.buffer.push_sentinel();
                tracing::debug!(
                    source = &*self.name,
                    stream_offset = self.source.stream_offset(),
                    "input exhausted"
                );
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
impl Reader<'_> {
    pub(crate) fn test_pointer(&self) -> usize {
        self.buffer.pointer()
    }

    pub(crate) fn test_resident(&self) -> usize {
        self.buffer.remaining()
    }
}
