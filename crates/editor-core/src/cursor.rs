/// A (line, column) location, both counted in code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Represents the caret and its associated selection range.
/// Uses the "Anchor and Head" directional selection model over absolute
/// code-point indices, the same numbering the layout boxes use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// The fixed starting point of a selection.
    pub anchor: usize,
    /// The active, moving end of a selection (where the caret is drawn).
    pub head: usize,
    /// The preferred column kept while moving across shorter lines.
    pub preferred_column: Option<usize>,
}

impl Cursor {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            anchor: index,
            head: index,
            preferred_column: None,
        }
    }

    /// Creates a selection from an anchor to a head.
    #[must_use]
    pub fn new_selection(anchor: usize, head: usize) -> Self {
        Self {
            anchor,
            head,
            preferred_column: None,
        }
    }

    /// Returns true if this is just a caret (no text selected).
    #[inline]
    #[must_use]
    pub fn no_selection(&self) -> bool {
        self.anchor == self.head
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        std::cmp::min(self.anchor, self.head)
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        std::cmp::max(self.anchor, self.head)
    }

    /// Returns the normalized half-open range regardless of direction.
    #[inline]
    #[must_use]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start()..self.end()
    }

    /// Moves the head, extending (or shrinking) the selection.
    pub fn set_head(&mut self, index: usize) {
        self.head = index;
    }

    /// Places a bare caret at `index`, dropping any selection.
    pub fn move_to(&mut self, index: usize) {
        self.anchor = index;
        self.head = index;
    }

    /// Pulls both ends back inside a buffer of `len` code points.
    pub fn clamp_to(&mut self, len: usize) {
        self.anchor = self.anchor.min(len);
        self.head = self.head.min(len);
    }
}
