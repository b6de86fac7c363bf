use std::path::{Path, PathBuf};

use editor_core::cursor::Cursor;
use editor_core::enums::ArrowKey;
use editor_core::text::TextBuffer;
use layout::engine::{Layout, LayoutParams};
use layout::font::{FontFamily, FontSettings};
use layout::geometry::{Point, ScrollOffset, Viewport};
use layout::gesture::{DragGesture, DragTarget, DragTransition, PointerButton, ThumbDrag};
use layout::metrics::GlyphMeasurer;
use layout::scroll::{SCROLLBAR_WIDTH, Scrollbars};
use tracing::{debug, info};

use crate::errors::SessionError;
use crate::preferences::PreferencesStore;

pub type SessionResult<T> = Result<T, SessionError>;

/// Smallest and largest baseline angle the editor accepts.
pub const ANGLE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=90.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAxis {
    Vertical,
    Horizontal,
}

/// Everything one editor window shows and edits.
///
/// All mutation goes through methods on this type. Each of them leaves the
/// cached [`Layout`] matching the current text, font, scroll and caret, and
/// mirrors persisted state into the [`PreferencesStore`].
pub struct Session {
    text: TextBuffer,
    cursor: Cursor,
    scroll: ScrollOffset,
    font: FontSettings,
    viewport: Viewport,
    layout: Layout,
    gesture: DragGesture,
    measurer: Box<dyn GlyphMeasurer>,
    preferences: PreferencesStore,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("len", &self.text.len())
            .field("cursor", &self.cursor)
            .field("scroll", &self.scroll)
            .field("font", &self.font)
            .field("viewport", &self.viewport)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}

/*

====================
===== CREATION =====
====================

*/

impl Session {
    /// Restores the last text, scroll offset and font choices from
    /// `preferences` and lays them out for `viewport`. The caret starts at
    /// the end of the restored text.
    pub fn new(
        mut preferences: PreferencesStore,
        measurer: Box<dyn GlyphMeasurer>,
        viewport: Viewport,
    ) -> Self {
        let mut font = preferences.load_font_settings();
        font.angle_degrees = clamp_angle(font.angle_degrees);
        let text = TextBuffer::from_text(&preferences.load_text());
        let scroll = preferences.load_scroll();
        let cursor = Cursor::new(text.len());

        info!(len = text.len(), ?scroll, ?font, "restored session");

        let mut session = Self {
            text,
            cursor,
            scroll,
            font,
            viewport,
            layout: Layout::default(),
            gesture: DragGesture::default(),
            measurer,
            preferences,
        };

        session.relayout();
        session
    }
}

/*

===================
===== GETTERS =====
===================

*/

impl Session {
    #[inline]
    #[must_use]
    pub fn text(&self) -> &TextBuffer {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    #[inline]
    #[must_use]
    pub fn font(&self) -> FontSettings {
        self.font
    }

    #[inline]
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Save is only offered when there is something to write.
    #[inline]
    #[must_use]
    pub fn can_save(&self) -> bool {
        !self.text.is_empty()
    }

    /// The selected text, empty when nothing is selected.
    #[must_use]
    pub fn selected_text(&self) -> &str {
        self.text.slice(self.cursor.range()).unwrap_or_default()
    }

    #[inline]
    #[must_use]
    pub fn preferences(&self) -> &PreferencesStore {
        &self.preferences
    }

    #[must_use]
    pub fn scrollbars(&self) -> Scrollbars {
        layout::scroll::scrollbars(
            self.layout.dimensions,
            self.viewport,
            self.scroll,
            self.font.angle_degrees,
        )
    }

    /// Which scrollbar thumb, if any, lies under `at` (canvas coordinates).
    #[must_use]
    pub fn thumb_at(&self, at: Point) -> Option<ScrollAxis> {
        let bars = self.scrollbars();

        let on_vertical = bars.vertical.is_some_and(|thumb| {
            at.x >= self.viewport.width - SCROLLBAR_WIDTH
                && at.x <= self.viewport.width
                && thumb.contains(at.y)
        });
        if on_vertical {
            return Some(ScrollAxis::Vertical);
        }

        let on_horizontal = bars.horizontal.is_some_and(|thumb| {
            at.y >= self.viewport.height - SCROLLBAR_WIDTH
                && at.y <= self.viewport.height
                && thumb.contains(at.x)
        });

        on_horizontal.then_some(ScrollAxis::Horizontal)
    }
}

/*

=======================
===== TEXT EDITS =====
=======================

*/

impl Session {
    /// Types `input` at the caret, replacing the selection if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the caret has fallen outside the buffer.
    pub fn insert_text(&mut self, input: &str) -> SessionResult<()> {
        if input.is_empty() {
            return Ok(());
        }

        self.delete_selection()?;
        let caret = self.text.insert(self.cursor.head, input)?;
        self.cursor.move_to(caret);
        self.cursor.preferred_column = None;

        self.text_changed();
        Ok(())
    }

    /// Deletes the selection, or the character before the caret.
    ///
    /// # Errors
    ///
    /// Returns an error if the caret has fallen outside the buffer.
    pub fn backspace(&mut self) -> SessionResult<()> {
        if !self.delete_selection()? {
            let head = self.cursor.head;
            if head == 0 {
                return Ok(());
            }

            self.text.delete(head - 1..head)?;
            self.cursor.move_to(head - 1);
        }

        self.cursor.preferred_column = None;
        self.text_changed();
        Ok(())
    }

    /// Deletes the selection, or the character after the caret.
    ///
    /// # Errors
    ///
    /// Returns an error if the caret has fallen outside the buffer.
    pub fn delete_forward(&mut self) -> SessionResult<()> {
        if !self.delete_selection()? {
            let head = self.cursor.head;
            if head >= self.text.len() {
                return Ok(());
            }

            self.text.delete(head..head + 1)?;
        }

        self.cursor.preferred_column = None;
        self.text_changed();
        Ok(())
    }

    /// Empties the buffer and returns to the top-left.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = Cursor::default();
        self.scroll = ScrollOffset::ORIGIN;

        info!("cleared buffer");

        self.preferences.store_scroll(self.scroll);
        self.text_changed();
    }

    /// Removes the selected range. Returns whether anything was selected.
    fn delete_selection(&mut self) -> SessionResult<bool> {
        if self.cursor.no_selection() {
            return Ok(false);
        }

        let range = self.cursor.range();
        self.text.delete(range.clone())?;
        self.cursor.move_to(range.start);

        Ok(true)
    }

    fn text_changed(&mut self) {
        self.preferences.store_text(self.text.as_str());
        self.relayout();
    }
}

/*

=====================
===== FILE I/O =====
=====================

*/

impl Session {
    /// Replaces the buffer with the contents of `path`.
    ///
    /// The type check happens before anything is read, and on any error the
    /// session is left untouched. An empty file also leaves it untouched.
    /// Otherwise scroll and caret go back to the start.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::File`] for an unsupported type or an I/O
    /// failure.
    pub fn load_file(&mut self, path: impl AsRef<Path>, mime: Option<&str>) -> SessionResult<()> {
        let loaded = io::file::load_text(path.as_ref(), mime)?;

        if loaded.is_empty() {
            debug!(path = ?path.as_ref(), "empty file, buffer kept");
            return Ok(());
        }

        self.text.replace_all(&loaded);
        self.text.mark_clean();
        self.cursor = Cursor::default();
        self.scroll = ScrollOffset::ORIGIN;

        self.preferences.store_scroll(self.scroll);
        self.text_changed();
        Ok(())
    }

    /// Writes the buffer into `dir` under a timestamped name.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::File`] when the buffer is empty or the write
    /// fails.
    pub fn save_file(&mut self, dir: impl AsRef<Path>) -> SessionResult<PathBuf> {
        let path = io::file::save_text(dir, self.text.as_str(), chrono::Utc::now())?;
        self.text.mark_clean();

        Ok(path)
    }

    /// Writes pending preference changes to disk.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Preferences`] if the store cannot be written.
    pub fn flush_preferences(&mut self) -> SessionResult<()> {
        self.preferences.save()?;
        Ok(())
    }
}

/*

==========================
===== FONT & VIEWPORT =====
==========================

*/

impl Session {
    pub fn set_font_family(&mut self, family: FontFamily) {
        self.font.family = family;
        self.font_changed();
    }

    /// Ignores non-positive and non-finite sizes.
    pub fn set_font_size(&mut self, size: f64) {
        if !size.is_finite() || size <= 0.0 {
            return;
        }

        self.font.size = size;
        self.font_changed();
    }

    /// Sets the baseline angle in degrees, clamped to [`ANGLE_RANGE`].
    pub fn set_angle(&mut self, angle_degrees: f64) {
        if !angle_degrees.is_finite() {
            return;
        }

        self.font.angle_degrees = clamp_angle(angle_degrees);
        self.font_changed();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }

        debug!(?viewport, "resized");
        self.viewport = viewport;
        self.relayout();
    }

    fn font_changed(&mut self) {
        self.preferences.store_font_settings(&self.font);
        self.relayout();
    }
}

fn clamp_angle(angle_degrees: f64) -> f64 {
    angle_degrees.clamp(*ANGLE_RANGE.start(), *ANGLE_RANGE.end())
}

/*

=================
===== INPUT =====
=================

*/

impl Session {
    /// Moves the caret to the slot nearest `at`. Returns the new caret index,
    /// or `None` when there is nothing to hit.
    pub fn click(&mut self, at: Point) -> Option<usize> {
        let index = layout::hit_test::hit_test(&self.layout.boxes, at, self.scroll)?;

        self.cursor.move_to(index);
        self.cursor.preferred_column = None;
        self.relayout();

        Some(index)
    }

    /// Scrolls by one wheel step.
    pub fn wheel(&mut self, delta_y: f64) {
        let scroll = layout::scroll::wheel(self.scroll, delta_y, self.font.angle_degrees);
        self.set_scroll(scroll);
    }

    /// Starts a drag. A primary press on a scrollbar thumb drags the thumb;
    /// anything else pans the canvas.
    pub fn press(&mut self, button: PointerButton, at: Point) -> Option<DragTransition> {
        if button == PointerButton::Primary
            && let Some(axis) = self.thumb_at(at)
        {
            return self.press_thumb(axis, at);
        }

        self.gesture.begin(DragTarget::Canvas { button }, at)
    }

    /// Starts dragging the thumb on `axis`. Returns `None` if that
    /// scrollbar is not showing or a drag is already running.
    pub fn press_thumb(&mut self, axis: ScrollAxis, at: Point) -> Option<DragTransition> {
        let bars = self.scrollbars();
        let thumb = match axis {
            ScrollAxis::Vertical => bars.vertical,
            ScrollAxis::Horizontal => bars.horizontal,
        }?;

        let drag = ThumbDrag {
            start_offset: self.scroll,
            start_pointer: at,
            thumb,
            angle_degrees: self.font.angle_degrees,
        };

        let target = match axis {
            ScrollAxis::Vertical => DragTarget::VerticalThumb(drag),
            ScrollAxis::Horizontal => DragTarget::HorizontalThumb(drag),
        };

        self.gesture.begin(target, at)
    }

    /// Feeds a pointer move to the running drag. Returns whether the view
    /// changed.
    pub fn drag_to(&mut self, at: Point) -> bool {
        match self.gesture.motion(at, self.scroll) {
            Some(scroll) => {
                self.set_scroll(scroll);
                true
            }
            None => false,
        }
    }

    /// Ends the drag. Releasing the primary button after a canvas drag also
    /// counts as a click at `at`.
    pub fn release(&mut self, at: Point) -> Option<DragTransition> {
        let (target, transition) = self.gesture.end()?;

        if target == (DragTarget::Canvas { button: PointerButton::Primary }) {
            self.click(at);
        }

        Some(transition)
    }

    /// Drops a running drag without a click.
    pub fn cancel_drag(&mut self) -> Option<DragTransition> {
        self.gesture.cancel()
    }

    /// Applies an arrow key. With `extend` the selection grows from its
    /// anchor.
    pub fn arrow(&mut self, key: ArrowKey, extend: bool) {
        self.cursor = editor_core::navigation::move_caret(
            &self.text,
            self.cursor,
            key,
            self.font.display_mode(),
            extend,
        );
        self.relayout();
    }

    fn set_scroll(&mut self, scroll: ScrollOffset) {
        if scroll == self.scroll {
            return;
        }

        self.scroll = scroll;
        self.preferences.store_scroll(scroll);
        self.relayout();
    }

    fn relayout(&mut self) {
        let params = LayoutParams {
            font: self.font,
            scroll: self.scroll,
            viewport: self.viewport,
            cursor: self.cursor,
        };

        self.layout = layout::engine::layout(&self.text, &params, self.measurer.as_mut());
    }
}
