/// # The Core Philosophies of This API
///
/// - Code points, not bytes: every public index is a code-point offset into the
///   flattened buffer, with each `\n` occupying exactly one position. That is
///   the unit the layout engine numbers its boxes in.
/// - The buffer owns its line index so the two never drift out of sync. Every
///   mutation rescans the text for newlines before returning.
/// - Reads take `&self`; only edits, clear and load take `&mut self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,

    /// One span per line, newline excluded. Never empty: an empty buffer
    /// still has a single empty line.
    lines: Vec<LineSpan>,

    /// Total length in code points, newlines included.
    len: usize,

    /// Tracks if the buffer has changes that were not written out.
    is_dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LineSpan {
    bytes: std::ops::Range<usize>,
    chars: std::ops::Range<usize>,
}

/*

====================
===== CREATION =====
====================

*/

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Creates a new, empty buffer holding a single empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Creates a buffer seeded with `text`. The result is not dirty.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self {
            text: text.to_owned(),
            lines: Vec::new(),
            len: 0,
            is_dirty: false,
        };

        buffer.reindex();
        buffer
    }

    /// Rebuilds the line spans from scratch.
    ///
    /// `\n` never occurs inside a multi-byte UTF-8 sequence, so the byte
    /// positions memchr reports are always valid slice boundaries.
    fn reindex(&mut self) {
        self.lines.clear();

        let bytes = self.text.as_bytes();
        let mut byte_start = 0;
        let mut char_start = 0;

        for newline in memchr::memchr_iter(b'\n', bytes) {
            let count = self.text[byte_start..newline].chars().count();

            self.lines.push(LineSpan {
                bytes: byte_start..newline,
                chars: char_start..char_start + count,
            });

            char_start += count + 1;
            byte_start = newline + 1;
        }

        let count = self.text[byte_start..].chars().count();

        self.lines.push(LineSpan {
            bytes: byte_start..bytes.len(),
            chars: char_start..char_start + count,
        });
        self.len = char_start + count;
    }
}

/*

==========================
===== INLINE METHODS =====
==========================

*/

impl TextBuffer {
    /// Returns the total number of lines. Never zero.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the number of code points, newlines included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    #[inline]
    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }
}

/*

===========================
========= GETTERS =========
===========================

*/

impl TextBuffer {
    /// Iterates every line, newline stripped. Yields at least one item.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|span| &self.text[span.bytes.clone()])
    }

    /// Converts an absolute code-point index into a (row, column) pair.
    ///
    /// The position of a `\n` belongs to the line it terminates; `len()` is
    /// the end of the last line.
    ///
    /// # Errors
    ///
    /// Returns [`TextBufferError::IndexOutOfBounds`] when `index > len()`.
    pub fn position_of(&self, index: usize) -> crate::errors::TextBufferResult<crate::cursor::Position> {
        self.check_index(index)?;

        let row = self
            .lines
            .partition_point(|span| span.chars.start <= index)
            .saturating_sub(1);

        Ok(crate::cursor::Position::new(
            row,
            index - self.lines[row].chars.start,
        ))
    }

    /// Converts a (row, column) pair into an absolute index.
    ///
    /// Rows past the end clamp to the last line and columns clamp to the line
    /// length, which is what vertical caret motion wants.
    #[must_use]
    pub fn index_of(&self, position: crate::cursor::Position) -> usize {
        let row = position.row.min(self.lines.len() - 1);
        let span = &self.lines[row];

        span.chars.start + position.column.min(span.chars.len())
    }

    /// Copies out the code points in `range`.
    ///
    /// # Errors
    ///
    /// Fails if the range is inverted or runs past the end of the buffer.
    pub fn slice(&self, range: std::ops::Range<usize>) -> crate::errors::TextBufferResult<&str> {
        let (start, end) = self.byte_range(range)?;

        Ok(&self.text[start..end])
    }

    fn check_index(&self, index: usize) -> crate::errors::TextBufferResult<()> {
        if index > self.len {
            return Err(crate::errors::TextBufferError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        Ok(())
    }

    /// Byte offset of the code point at `index`, or of the end of the text.
    fn byte_offset(&self, index: usize) -> crate::errors::TextBufferResult<usize> {
        let position = self.position_of(index)?;
        let span = &self.lines[position.row];
        let line = &self.text[span.bytes.clone()];
        let within = line
            .char_indices()
            .nth(position.column)
            .map_or(line.len(), |(byte, _)| byte);

        Ok(span.bytes.start + within)
    }

    fn byte_range(
        &self,
        range: std::ops::Range<usize>,
    ) -> crate::errors::TextBufferResult<(usize, usize)> {
        if range.start > range.end {
            return Err(crate::errors::TextBufferError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }

        Ok((self.byte_offset(range.start)?, self.byte_offset(range.end)?))
    }
}

/*

========================================
========= INSERTION & DELETION =========
========================================

*/

impl TextBuffer {
    /// Inserts `text` before the code point at `index`.
    ///
    /// Returns the index just past the inserted text, which is where the
    /// caret belongs afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`TextBufferError::IndexOutOfBounds`] when `index > len()`.
    pub fn insert(&mut self, index: usize, text: &str) -> crate::errors::TextBufferResult<usize> {
        let at = self.byte_offset(index)?;

        if text.is_empty() {
            return Ok(index);
        }

        self.text.insert_str(at, text);
        self.reindex();
        self.is_dirty = true;

        Ok(index + text.chars().count())
    }

    /// Removes the code points in `range` and returns them.
    ///
    /// # Errors
    ///
    /// Fails if the range is inverted or runs past the end of the buffer.
    pub fn delete(&mut self, range: std::ops::Range<usize>) -> crate::errors::TextBufferResult<String> {
        let (start, end) = self.byte_range(range)?;

        if start == end {
            return Ok(String::new());
        }

        let removed: String = self.text.drain(start..end).collect();

        self.reindex();
        self.is_dirty = true;

        Ok(removed)
    }

    /// Replaces the whole content, as a file load does.
    pub fn replace_all(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.reindex();
        self.is_dirty = true;
    }

    /// Empties the buffer down to a single empty line.
    pub fn clear(&mut self) {
        self.replace_all("");
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Position;
    use crate::errors::TextBufferError;

    #[test]
    fn test_textbuffer_new() {
        let buffer = TextBuffer::new();

        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.len(), 0);
        assert!(buffer.is_empty());
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_lines_split_on_newline() {
        let buffer = TextBuffer::from_text("AB\nC");

        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["AB", "C"]);
    }

    #[test]
    fn test_trailing_newline_yields_empty_last_line() {
        let buffer = TextBuffer::from_text("abc\n");

        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.lines().last(), Some(""));
    }

    #[test]
    fn test_multibyte_code_points_count_once() {
        let buffer = TextBuffer::from_text("あい\nう");

        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.slice(1..4).unwrap(), "い\nう");
    }

    #[test]
    fn test_position_of_newline_belongs_to_its_line() {
        let buffer = TextBuffer::from_text("AB\nC");

        assert_eq!(buffer.position_of(0).unwrap(), Position::new(0, 0));
        assert_eq!(buffer.position_of(2).unwrap(), Position::new(0, 2));
        assert_eq!(buffer.position_of(3).unwrap(), Position::new(1, 0));
        assert_eq!(buffer.position_of(4).unwrap(), Position::new(1, 1));
        assert_eq!(
            buffer.position_of(5),
            Err(TextBufferError::IndexOutOfBounds { index: 5, len: 4 })
        );
    }

    #[test]
    fn test_index_of_clamps() {
        let buffer = TextBuffer::from_text("Hello\nHi");

        assert_eq!(buffer.index_of(Position::new(1, 1)), 7);
        assert_eq!(buffer.index_of(Position::new(1, 40)), 8);
        assert_eq!(buffer.index_of(Position::new(9, 0)), 6);
    }

    #[test]
    fn test_insert_returns_caret_after_text() {
        let mut buffer = TextBuffer::from_text("AC");

        let caret = buffer.insert(1, "B\n").unwrap();

        assert_eq!(caret, 3);
        assert_eq!(buffer.as_str(), "AB\nC");
        assert_eq!(buffer.line_count(), 2);
        assert!(buffer.is_dirty());
    }

    #[test]
    fn test_insert_out_of_bounds_fails() {
        let mut buffer = TextBuffer::from_text("A");

        assert!(buffer.insert(3, "x").is_err());
        assert_eq!(buffer.as_str(), "A");
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_delete_across_lines() {
        let mut buffer = TextBuffer::from_text("Hello\nWorld\nEnd");

        let removed = buffer.delete(1..13).unwrap();

        assert_eq!(removed, "ello\nWorld\nE");
        assert_eq!(buffer.as_str(), "Hnd");
        assert_eq!(buffer.line_count(), 1);
    }

    #[test]
    fn test_delete_inverted_range_fails() {
        let mut buffer = TextBuffer::from_text("abc");

        #[allow(clippy::reversed_empty_ranges)]
        let result = buffer.delete(2..1);

        assert_eq!(result, Err(TextBufferError::InvalidRange { start: 2, end: 1 }));
    }

    #[test]
    fn test_clear_and_replace_all() {
        let mut buffer = TextBuffer::from_text("one\ntwo");

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.line_count(), 1);

        buffer.replace_all("x\ny\nz");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.to_string(), "x\ny\nz");
    }
}
