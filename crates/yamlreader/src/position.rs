/// Where the reader stands: characters consumed, plus the 0-based line and
/// column of the next character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Number of characters consumed so far.
    pub index: usize,
    /// 0-based line.
    pub line: usize,
    /// 0-based column.
    pub column: usize,
}

/// Byte order mark; consumed without occupying a column.
pub(crate) const BOM: char = '\u{FEFF}';

/// Whether consuming `ch`, followed by `next`, ends a line.
///
/// A carriage return only ends the line when it is not the first half of a
/// CRLF pair; the line feed does that instead.
#[inline]
#[must_use]
pub fn is_line_break(ch: char, next: char) -> bool {
    match ch {
        '\n' | '\u{85}' | '\u{2028}' | '\u{2029}' => true,
        '\r' => next != '\n',
        _ => false,
    }
}

impl Position {
    /// Accounts for consuming `ch`; `next` is the character after it.
    #[inline]
    pub(crate) fn advance(&mut self, ch: char, next: char) {
        self.index += 1;
        if is_line_break(ch, next) {
            self.line += 1;
            self.column = 0;
        } else if ch != BOM {
            self.column += 1;
        }
    }
}
