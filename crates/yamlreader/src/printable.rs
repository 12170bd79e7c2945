//! The printable character set.
//!
//! A YAML stream may only carry the characters listed in
//! [`PRINTABLE_RANGES`]. Everything the reader decodes passes through
//! [`check_printable`] before it is appended to the buffer, so text behind the
//! consumption pointer never needs to be looked at again.

use core::ops::RangeInclusive;

use crate::{
    error::{ReaderError, Unacceptable},
    source::Encoding,
};

/// Reason attached to every printable-set violation.
pub const NON_PRINTABLE_REASON: &str = "special characters are not allowed";

/// Inclusive code point ranges admitted into the buffer.
///
/// The surrogate block is excluded implicitly since `char` cannot hold it; the
/// gap between `U+D7FF` and `U+E000` is kept explicit anyway so the table
/// reads the same as the set it describes.
pub const PRINTABLE_RANGES: &[RangeInclusive<char>] = &[
    '\u{09}'..='\u{0A}',
    '\u{0D}'..='\u{0D}',
    '\u{20}'..='\u{7E}',
    '\u{85}'..='\u{85}',
    '\u{A0}'..='\u{D7FF}',
    '\u{E000}'..='\u{FFFD}',
];

/// Whether `ch` belongs to the printable set.
#[inline]
#[must_use]
pub fn is_printable(ch: char) -> bool {
    if ch.is_ascii() {
        return matches!(ch, '\t' | '\n' | '\r' | ' '..='~');
    }
    PRINTABLE_RANGES.iter().any(|range| range.contains(&ch))
}

/// Finds the first character of `text` outside the printable set.
///
/// Returns its offset in characters (not bytes) together with the character.
#[must_use]
pub fn find_non_printable(text: &str) -> Option<(usize, char)> {
    text.chars()
        .enumerate()
        .find(|&(_, ch)| !is_printable(ch))
}

/// Validates `text`, whose first character sits at absolute index `start`.
///
/// # Errors
///
/// Returns a [`ReaderError`] naming the first disallowed character. Nothing
/// of `text` should be admitted when this fails.
pub(crate) fn check_printable(
    text: &str,
    start: usize,
    name: &str,
    encoding: Encoding,
) -> Result<(), ReaderError> {
    match find_non_printable(text) {
        None => Ok(()),
        Some((offset, ch)) => {
            tracing::debug!(
                source = name,
                position = start + offset,
                ?ch,
                "non-printable character"
            );
            Err(ReaderError {
                name: name.into(),
                position: start + offset,
                character: Unacceptable::Char(ch),
                encoding,
                reason: NON_PRINTABLE_REASON,
            })
        }
    }
}
