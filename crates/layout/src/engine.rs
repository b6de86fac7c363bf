use tracing::{trace, warn};

use crate::errors::LayoutError;
use crate::font::FontSettings;
use crate::geometry::{CharBox, Point, ScrollOffset, TextDimensions, Viewport};
use crate::metrics::GlyphMeasurer;

/// Extra distance between consecutive lines, on top of the font size.
pub const LINE_GAP: f64 = 10.0;

/// Everything besides the text that a layout pass depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutParams {
    pub font: FontSettings,
    pub scroll: ScrollOffset,
    pub viewport: Viewport,
    pub cursor: editor_core::cursor::Cursor,
}

/// A glyph that falls inside the viewport and should be painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedGlyph {
    pub index: usize,
    /// The display glyph, after mode substitution.
    pub glyph: char,
    /// Top-left corner in screen coordinates.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub selected: bool,
}

/// Output of one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// One box per character plus one sentinel per line, in index order.
    pub boxes: Vec<CharBox>,
    pub dimensions: TextDimensions,
    /// Caret top in screen coordinates.
    pub caret: Point,
    pub glyphs: Vec<PlacedGlyph>,
    /// Indices whose glyph could not be placed.
    pub skipped: Vec<usize>,
    /// Unit vector along the baseline.
    pub direction: Point,
    /// Offset from one line start to the next.
    pub line_step: Point,
}

impl Layout {
    /// Whether the caret lies on the canvas.
    #[inline]
    #[must_use]
    pub fn caret_visible(&self, viewport: Viewport) -> bool {
        viewport.contains(self.caret)
    }
}

/// Lays `buffer` out along the baseline described by `params.font`.
///
/// Lines advance from one another by `(-sin θ, cos θ) * (size + LINE_GAP)`
/// and glyphs within a line by `(cos θ, sin θ) * advance`. Every line start is
/// pushed right by the largest leftward drift any line accumulates, so no
/// line starts left of the canvas edge.
///
/// A box is recorded for every slot, visible or not; only painting is culled
/// to the viewport. A glyph that cannot be measured still gets a zero-width
/// box so the index sequence has no holes.
pub fn layout(
    buffer: &editor_core::text::TextBuffer,
    params: &LayoutParams,
    measurer: &mut dyn GlyphMeasurer,
) -> Layout {
    let font = &params.font;
    let size = font.size;
    let theta = font.theta();
    let mode = font.display_mode();
    let spacing = font.letter_spacing();
    let viewport = params.viewport;
    let scroll = params.scroll.as_point();

    let direction = Point::new(theta.cos(), theta.sin());
    let line_step = Point::new(-theta.sin(), theta.cos()) * (size + LINE_GAP);
    let line_count = buffer.line_count();
    let max_offset = theta.sin() * (size + LINE_GAP) * (line_count - 1) as f64;
    let base = Point::new(size + max_offset.max(0.0), size) - scroll;

    let selection = params.cursor.range();
    let caret_index = params.cursor.head.min(buffer.len());

    let mut boxes = Vec::with_capacity(buffer.len() + line_count);
    let mut glyphs = Vec::new();
    let mut skipped = Vec::new();
    let mut caret = base;
    let mut max_width: f64 = 0.0;
    let mut max_height: f64 = 0.0;
    let mut index = 0;

    for (row, line) in buffer.lines().enumerate() {
        let mut pen = base + line_step * row as f64;
        let mut line_width = 0.0;

        if index == caret_index {
            caret = pen;
        }

        for ch in line.chars() {
            let glyph = editor_core::glyphs::display_glyph(ch, mode);

            match advance_for(glyph, font, spacing, measurer) {
                Ok(width) => {
                    let visible = pen.x >= -width
                        && pen.x <= viewport.width
                        && pen.y >= -size
                        && pen.y <= viewport.height;

                    if visible {
                        glyphs.push(PlacedGlyph {
                            index,
                            glyph,
                            origin: pen,
                            width,
                            height: size,
                            selected: selection.contains(&index),
                        });
                    }

                    boxes.push(CharBox {
                        x: pen.x + scroll.x,
                        y: pen.y + scroll.y,
                        width,
                        height: size,
                        index,
                    });

                    pen += direction * width;
                    line_width += width;
                }
                Err(error) => {
                    warn!(%error, row, index, "skipping glyph");
                    skipped.push(index);
                    boxes.push(CharBox {
                        x: pen.x + scroll.x,
                        y: pen.y + scroll.y,
                        width: 0.0,
                        height: size,
                        index,
                    });
                }
            }

            if index + 1 == caret_index {
                caret = pen;
            }
            index += 1;
        }

        // Sentinel for the newline (or end of text) so the slot after the
        // last glyph, and empty lines, can be clicked.
        boxes.push(CharBox {
            x: pen.x + scroll.x,
            y: pen.y + scroll.y,
            width: size,
            height: size,
            index,
        });
        index += 1;

        max_width = max_width.max(line_width);
        max_height = max_height.max(pen.y + scroll.y + size);
    }

    let dimensions = TextDimensions {
        width: max_width + size * 2.0,
        height: max_height + size * 2.0,
    };

    trace!(
        boxes = boxes.len(),
        painted = glyphs.len(),
        skipped = skipped.len(),
        "layout pass"
    );

    Layout {
        boxes,
        dimensions,
        caret,
        glyphs,
        skipped,
        direction,
        line_step,
    }
}

/// Per-character transform: display glyph to advance width.
fn advance_for(
    glyph: char,
    font: &FontSettings,
    spacing: f64,
    measurer: &mut dyn GlyphMeasurer,
) -> Result<f64, LayoutError> {
    let width = measurer.measure(glyph, font)? + spacing;

    if !width.is_finite() || width < 0.0 {
        return Err(LayoutError::InvalidAdvance { glyph, width });
    }

    Ok(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontFamily;
    use crate::metrics::FixedAdvance;
    use editor_core::cursor::Cursor;
    use editor_core::text::TextBuffer;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn params(angle_degrees: f64, size: f64) -> LayoutParams {
        LayoutParams {
            font: FontSettings {
                family: FontFamily::Default,
                size,
                angle_degrees,
            },
            scroll: ScrollOffset::ORIGIN,
            viewport: Viewport::new(800.0, 600.0),
            cursor: Cursor::new(0),
        }
    }

    fn run(text: &str, params: &LayoutParams) -> Layout {
        layout(&TextBuffer::from_text(text), params, &mut FixedAdvance::default())
    }

    /// Fails on one glyph, measures everything else at a fixed width.
    struct Flaky {
        bad: char,
    }

    impl GlyphMeasurer for Flaky {
        fn measure(&mut self, glyph: char, _font: &FontSettings) -> Result<f64, LayoutError> {
            if glyph == self.bad {
                return Err(LayoutError::Measure {
                    glyph,
                    reason: "no such glyph".into(),
                });
            }
            Ok(8.0)
        }
    }

    #[test]
    fn test_box_count_is_chars_plus_lines() {
        for text in ["", "A", "AB\nC", "\n\n", "hello\nworld\n", "あい\nう\n\nえ"] {
            let buffer = TextBuffer::from_text(text);
            let chars = text.chars().filter(|c| *c != '\n').count();
            let result = run(text, &params(8.0, 16.0));

            assert_eq!(result.boxes.len(), chars + buffer.line_count(), "{text:?}");
        }
    }

    #[test]
    fn test_box_indices_cover_every_position_in_order() {
        let result = run("ab\n\ncd", &params(30.0, 16.0));
        let indices: Vec<usize> = result.boxes.iter().map(|b| b.index).collect();

        assert_eq!(indices, (0..=6).collect::<Vec<_>>());
    }

    #[test]
    fn test_angle_zero_stacks_lines_downward() {
        let result = run("A\nB", &params(0.0, 16.0));

        assert_close(result.line_step.x, 0.0);
        assert_close(result.line_step.y, 16.0 + LINE_GAP);

        let first = result.boxes[0];
        let second_line = result.boxes[2];
        assert_close(second_line.x - first.x, 0.0);
        assert_close(second_line.y - first.y, 26.0);
    }

    #[test]
    fn test_angle_ninety_advances_straight_down() {
        let result = run("ABC", &params(90.0, 16.0));
        let a = result.boxes[0];
        let b = result.boxes[1];

        assert_close(result.direction.x * a.width, 0.0);
        assert_close(result.direction.y * a.width, a.width);
        assert_close(b.x - a.x, 0.0);
        assert_close(b.y - a.y, a.width);
    }

    #[test]
    fn test_scenario_two_lines_at_eight_degrees() {
        let result = run("AB\nC", &params(8.0, 16.0));
        let theta = 8.0_f64.to_radians();

        assert_eq!(result.boxes.len(), 5);
        assert_eq!(result.boxes.iter().filter(|b| b.width == 16.0).count(), 2, "two sentinels");

        let line_one = result.boxes[0];
        let line_two = result.boxes[3];
        assert_eq!(line_two.index, 3);
        assert_close(line_two.x - line_one.x, -theta.sin() * 26.0);
        assert_close(line_two.y - line_one.y, theta.cos() * 26.0);
    }

    #[test]
    fn test_line_start_offset_keeps_last_line_on_canvas() {
        let result = run("a\nb\nc", &params(45.0, 16.0));
        let last_line_start = result.boxes[4];

        assert_close(last_line_start.x, 16.0);
    }

    #[test]
    fn test_glyphs_advance_along_baseline() {
        let result = run("AB", &params(30.0, 16.0));
        let theta = 30.0_f64.to_radians();
        let a = result.boxes[0];
        let b = result.boxes[1];

        assert_close(b.x - a.x, theta.cos() * a.width);
        assert_close(b.y - a.y, theta.sin() * a.width);
        // measured 8.0 plus spacing
        assert_close(a.width, 8.0 + params(30.0, 16.0).font.letter_spacing());
    }

    #[test]
    fn test_empty_line_gets_sentinel() {
        let result = run("A\n\nB", &params(0.0, 16.0));
        let empty_line = result.boxes.iter().find(|b| b.index == 2).unwrap();

        assert_close(empty_line.x, 16.0);
        assert_close(empty_line.y, 16.0 + 26.0);
        assert_close(empty_line.width, 16.0);
    }

    #[test]
    fn test_caret_at_buffer_start_is_line_start() {
        let result = run("AB", &params(8.0, 16.0));

        assert_eq!(result.caret, Point::new(result.boxes[0].x, result.boxes[0].y));
    }

    #[test]
    fn test_caret_follows_preceding_character() {
        let mut p = params(8.0, 16.0);
        p.cursor = Cursor::new(2);
        let result = run("AB\nC", &p);
        let sentinel = result.boxes[2];

        assert_close(result.caret.x, sentinel.x);
        assert_close(result.caret.y, sentinel.y);
    }

    #[test]
    fn test_caret_at_start_of_later_line() {
        let mut p = params(8.0, 16.0);
        p.cursor = Cursor::new(3);
        let result = run("AB\nC", &p);
        let line_two = result.boxes[3];

        assert_close(result.caret.x, line_two.x);
        assert_close(result.caret.y, line_two.y);
    }

    #[test]
    fn test_offscreen_text_keeps_boxes() {
        let mut p = params(8.0, 16.0);
        p.scroll = ScrollOffset::new(5_000.0, 5_000.0);
        let result = run("far away\ntext", &p);

        assert!(result.glyphs.is_empty());
        assert_eq!(result.boxes.len(), 14);
    }

    #[test]
    fn test_boxes_are_scroll_invariant() {
        let still = run("AB\nC", &params(8.0, 16.0));
        let mut p = params(8.0, 16.0);
        p.scroll = ScrollOffset::new(4.0, -12.0);
        let scrolled = run("AB\nC", &p);

        for (a, b) in still.boxes.iter().zip(&scrolled.boxes) {
            assert_close(a.x, b.x);
            assert_close(a.y, b.y);
        }
        assert_close(still.dimensions.height, scrolled.dimensions.height);
        assert_close(scrolled.glyphs[0].origin.x, still.glyphs[0].origin.x - 4.0);
    }

    #[test]
    fn test_dimensions() {
        let result = run("AB\nC", &params(0.0, 16.0));
        let advance = 8.0 + 1.6;

        assert_close(result.dimensions.width, 2.0 * advance + 32.0);
        // second line top at 16 + 26, plus one line of glyph, plus margins
        assert_close(result.dimensions.height, 42.0 + 16.0 + 32.0);
    }

    #[test]
    fn test_selection_flags_glyphs() {
        let mut p = params(8.0, 16.0);
        p.cursor = Cursor::new_selection(3, 1);
        let result = run("ABCD", &p);
        let selected: Vec<usize> = result
            .glyphs
            .iter()
            .filter(|g| g.selected)
            .map(|g| g.index)
            .collect();

        assert_eq!(selected, vec![1, 2]);
    }

    #[test]
    fn test_failed_glyph_is_skipped_not_dropped() {
        let buffer = TextBuffer::from_text("AXB");
        let result = layout(&buffer, &params(0.0, 16.0), &mut Flaky { bad: 'X' });

        assert_eq!(result.skipped, vec![1]);
        assert_eq!(result.boxes.len(), 4);
        assert_eq!(result.boxes[1].width, 0.0);
        // B sits right where X would have started
        assert_close(result.boxes[2].x, result.boxes[1].x);
        assert!(result.glyphs.iter().all(|g| g.glyph != 'X'));
        assert_eq!(result.glyphs.len(), 2);
    }

    #[test]
    fn test_vertical_mode_measures_substituted_glyph() {
        struct WideVertical;

        impl GlyphMeasurer for WideVertical {
            fn measure(&mut self, glyph: char, _font: &FontSettings) -> Result<f64, LayoutError> {
                Ok(if glyph == '︒' { 20.0 } else { 8.0 })
            }
        }

        let buffer = TextBuffer::from_text("。");
        let upright = layout(&buffer, &params(70.0, 16.0), &mut WideVertical);
        let slanted = layout(&buffer, &params(50.0, 16.0), &mut WideVertical);

        assert_eq!(upright.glyphs[0].glyph, '︒');
        assert_eq!(slanted.glyphs[0].glyph, '。');
        assert_close(
            upright.boxes[0].width,
            20.0 + params(70.0, 16.0).font.letter_spacing(),
        );
        assert_close(
            slanted.boxes[0].width,
            8.0 + params(50.0, 16.0).font.letter_spacing(),
        );
    }
}
