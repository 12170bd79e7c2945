#![expect(clippy::inline_always)]

use std::{collections::VecDeque, sync::Arc};

/// Appended once the source is exhausted; lookahead past the end of the
/// input always yields it.
pub const SENTINEL: char = '\0';

/// Decoded text that has not been fully consumed, plus the consumption
/// pointer into it.
///
/// Characters before `pointer` are consumed but stay resident until the next
/// [`compact`](Self::compact), which is what lets a mark show the line the
/// reader is on.
#[derive(Debug, Default)]
pub(crate) struct Buffer {
    data: VecDeque<char>,
    pointer: usize,
    terminated: bool,
}

impl Buffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text` followed by the sentinel.
    pub(crate) fn terminated(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.push_str(text);
        buffer.push_sentinel();
        buffer
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        debug_assert!(!self.terminated, "text pushed after the sentinel");
        // Byte length is an upper bound on the number of chars.
        self.data.reserve(text.len());
        self.data.extend(text.chars());
    }

    /// Appends the sentinel. Later calls are no-ops.
    pub(crate) fn push_sentinel(&mut self) {
        if !self.terminated {
            self.data.push_back(SENTINEL);
            self.terminated = true;
        }
    }

    /// Drops the consumed prefix and resets the pointer.
    pub(crate) fn compact(&mut self) {
        self.data.drain(..self.pointer);
        self.pointer = 0;
    }

    /// Characters resident at or after the pointer.
    #[inline(always)]
    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pointer
    }

    #[inline(always)]
    pub(crate) fn pointer(&self) -> usize {
        self.pointer
    }

    #[inline(always)]
    pub(crate) fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// The character `offset` places past the pointer, if resident.
    #[inline(always)]
    pub(crate) fn get(&self, offset: usize) -> Option<char> {
        self.data.get(self.pointer + offset).copied()
    }

    /// Up to `length` resident characters starting at the pointer.
    pub(crate) fn slice(&self, length: usize) -> String {
        let end = self.data.len().min(self.pointer.saturating_add(length));
        self.data.range(self.pointer..end).collect()
    }

    /// Moves the pointer forward, never past the end of the data.
    #[inline(always)]
    pub(crate) fn advance(&mut self, count: usize) {
        self.pointer = self.data.len().min(self.pointer.saturating_add(count));
    }

    /// Copies every resident character, consumed or not.
    pub(crate) fn snapshot(&self) -> Arc<str> {
        self.data.iter().collect::<String>().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_discards_consumed_prefix() {
        let mut buffer = Buffer::new();
        buffer.push_str("hello");
        buffer.advance(3);
        assert_eq!(buffer.remaining(), 2);
        buffer.compact();
        assert_eq!(buffer.pointer(), 0);
        assert_eq!(buffer.remaining(), 2);
        assert_eq!(buffer.slice(10), "lo");
        assert_eq!(&*buffer.snapshot(), "lo");
    }

    #[test]
    fn sentinel_is_appended_once() {
        let mut buffer = Buffer::terminated("ab");
        buffer.push_sentinel();
        assert_eq!(buffer.remaining(), 3);
        assert_eq!(buffer.get(2), Some(SENTINEL));
        assert_eq!(buffer.get(3), None);
    }

    #[test]
    fn advance_is_clamped() {
        let mut buffer = Buffer::terminated("a");
        buffer.advance(5);
        assert_eq!(buffer.pointer(), 2);
        assert_eq!(buffer.remaining(), 0);
        assert_eq!(buffer.slice(3), "");
    }

    #[test]
    fn multibyte_chars_are_single_slots() {
        let mut buffer = Buffer::new();
        buffer.push_str("åβ\u{2028}");
        assert_eq!(buffer.remaining(), 3);
        assert_eq!(buffer.get(1), Some('β'));
    }
}
