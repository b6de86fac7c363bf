//! Arrow-key caret motion.
//!
//! With a vertical-ish baseline the glyphs of one line run top to bottom and
//! successive lines step leftwards, so the keys are remapped to keep them
//! pointing the way the reader sees the text:
//!
//! | key   | horizontal     | vertical       |
//! |-------|----------------|----------------|
//! | Up    | previous line  | previous char  |
//! | Down  | next line      | next char      |
//! | Left  | previous char  | next line      |
//! | Right | next char      | previous line  |

use crate::cursor::{Cursor, Position};
use crate::enums::{ArrowKey, DisplayMode};
use crate::text::TextBuffer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Motion {
    Backward,
    Forward,
    LineUp,
    LineDown,
}

impl Motion {
    fn for_key(key: ArrowKey, mode: DisplayMode) -> Self {
        match (mode, key) {
            (DisplayMode::Horizontal, ArrowKey::Left) => Motion::Backward,
            (DisplayMode::Horizontal, ArrowKey::Right) => Motion::Forward,
            (DisplayMode::Horizontal, ArrowKey::Up) => Motion::LineUp,
            (DisplayMode::Horizontal, ArrowKey::Down) => Motion::LineDown,
            (DisplayMode::Vertical, ArrowKey::Up) => Motion::Backward,
            (DisplayMode::Vertical, ArrowKey::Down) => Motion::Forward,
            (DisplayMode::Vertical, ArrowKey::Right) => Motion::LineUp,
            (DisplayMode::Vertical, ArrowKey::Left) => Motion::LineDown,
        }
    }
}

/// Applies one arrow key press and returns the resulting cursor.
///
/// With `extend` the anchor stays put and the selection grows or shrinks;
/// without it a selection collapses and the caret moves.
#[must_use]
pub fn move_caret(
    buffer: &TextBuffer,
    mut cursor: Cursor,
    key: ArrowKey,
    mode: DisplayMode,
    extend: bool,
) -> Cursor {
    cursor.clamp_to(buffer.len());

    let motion = Motion::for_key(key, mode);

    // Left/right style motion over a selection just collapses it to the
    // matching edge.
    if !extend && !cursor.no_selection() {
        match motion {
            Motion::Backward => {
                cursor.move_to(cursor.start());
                cursor.preferred_column = None;
                return cursor;
            }
            Motion::Forward => {
                cursor.move_to(cursor.end());
                cursor.preferred_column = None;
                return cursor;
            }
            Motion::LineUp | Motion::LineDown => {}
        }
    }

    let head = cursor.head;
    let target = match motion {
        Motion::Backward => {
            cursor.preferred_column = None;
            head.saturating_sub(1)
        }
        Motion::Forward => {
            cursor.preferred_column = None;
            (head + 1).min(buffer.len())
        }
        Motion::LineUp | Motion::LineDown => {
            let Ok(position) = buffer.position_of(head) else {
                return cursor;
            };
            let column = *cursor.preferred_column.get_or_insert(position.column);
            let row = match motion {
                Motion::LineUp if position.row > 0 => position.row - 1,
                Motion::LineDown if position.row + 1 < buffer.line_count() => position.row + 1,
                _ => position.row,
            };

            if row == position.row {
                head
            } else {
                buffer.index_of(Position::new(row, column))
            }
        }
    };

    if extend {
        cursor.set_head(target);
    } else {
        cursor.move_to(target);
    }

    cursor
}
