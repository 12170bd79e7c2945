//! Immutable position snapshots for diagnostics.

use core::fmt;
use std::sync::Arc;

use crate::position::Position;

const SNIPPET_INDENT: usize = 4;
const SNIPPET_MAX_LENGTH: usize = 75;
const ELLIPSIS: &str = " ... ";

/// A snapshot of where the reader stood.
///
/// Marks taken from in-memory sources also carry a copy of the resident buffer
/// and the pointer into it, which is enough to render the offending line.
/// Marks from handles carry only the coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Mark {
    name: Arc<str>,
    position: Position,
    buffer: Option<Arc<str>>,
    pointer: Option<usize>,
}

impl Mark {
    /// Builds a mark; `buffer` and `pointer` are kept only when both are given.
    #[must_use]
    pub fn new(
        name: impl Into<Arc<str>>,
        position: Position,
        buffer: Option<Arc<str>>,
        pointer: Option<usize>,
    ) -> Self {
        let (buffer, pointer) = match (buffer, pointer) {
            (Some(buffer), Some(pointer)) => (Some(buffer), Some(pointer)),
            _ => (None, None),
        };
        Self {
            name: name.into(),
            position,
            buffer,
            pointer,
        }
    }

    /// Source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Characters consumed when the mark was taken.
    #[must_use]
    pub fn index(&self) -> usize {
        self.position.index
    }

    /// 0-based line.
    #[must_use]
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// 0-based column.
    #[must_use]
    pub fn column(&self) -> usize {
        self.position.column
    }

    /// All three coordinates at once.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Resident buffer at the time of the mark, if captured.
    #[must_use]
    pub fn buffer(&self) -> Option<&str> {
        self.buffer.as_deref()
    }

    /// Pointer into [`buffer`](Self::buffer), counted in characters.
    #[must_use]
    pub fn pointer(&self) -> Option<usize> {
        self.pointer
    }

    /// Renders the line around the pointer with a caret under it.
    ///
    /// Text further than `max_length / 2` characters from the pointer is cut
    /// and replaced by ` ... `. Returns `None` when the mark has no buffer.
    #[must_use]
    pub fn snippet(&self, indent: usize, max_length: usize) -> Option<String> {
        let chars: Vec<char> = self.buffer.as_deref()?.chars().collect();
        let pointer = self.pointer?.min(chars.len());
        let half = (max_length / 2).saturating_sub(1);
        let ends_line =
            |ch: char| matches!(ch, '\0' | '\r' | '\n' | '\u{85}' | '\u{2028}' | '\u{2029}');

        let mut head = "";
        let mut start = pointer;
        while start > 0 && !ends_line(chars[start - 1]) {
            start -= 1;
            if pointer - start > half {
                head = ELLIPSIS;
                start = (start + ELLIPSIS.len()).min(pointer);
                break;
            }
        }

        let mut tail = "";
        let mut end = pointer;
        while end < chars.len() && !ends_line(chars[end]) {
            end += 1;
            if end - pointer > half {
                tail = ELLIPSIS;
                end = end.saturating_sub(ELLIPSIS.len()).max(pointer);
                break;
            }
        }

        let mut out = String::new();
        out.extend(core::iter::repeat_n(' ', indent));
        out.push_str(head);
        out.extend(&chars[start..end]);
        out.push_str(tail);
        out.push('\n');
        out.extend(core::iter::repeat_n(' ', indent + pointer - start + head.len()));
        out.push('^');
        Some(out)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  in \"{}\", line {}, column {}",
            self.name,
            self.position.line + 1,
            self.position.column + 1
        )?;
        if let Some(snippet) = self.snippet(SNIPPET_INDENT, SNIPPET_MAX_LENGTH) {
            write!(f, ":\n{snippet}")?;
        }
        Ok(())
    }
}
