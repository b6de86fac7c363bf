use layout::engine::Layout;
use layout::font::FontSettings;
use layout::geometry::{Point, Viewport};
use layout::scroll::{SCROLLBAR_WIDTH, Scrollbars};
use tracing::{trace, warn};

use crate::canvas::Canvas;
use crate::palette;

/// Everything one repaint needs.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub layout: &'a Layout,
    pub font: &'a FontSettings,
    pub viewport: Viewport,
    pub scrollbars: Scrollbars,
    /// Off during the dark half of a blink.
    pub caret_on: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaintReport {
    pub painted: usize,
    /// Buffer indices whose glyph failed to draw.
    pub skipped: Vec<usize>,
}

/// Paints one frame: background, then per glyph its selection highlight and
/// the glyph itself, then the caret and scrollbars on top.
///
/// A glyph that fails to draw is logged and left out; the rest of the frame
/// is still painted.
pub fn paint(frame: &Frame<'_>, canvas: &mut dyn Canvas) -> PaintReport {
    let mut report = PaintReport::default();

    canvas.clear(frame.viewport);

    for placed in &frame.layout.glyphs {
        if placed.selected {
            canvas.fill_rect(placed.origin, placed.width, placed.height, palette::SELECTION);
        }

        match canvas.draw_glyph(placed.glyph, placed.origin, frame.font) {
            Ok(()) => report.painted += 1,
            Err(error) => {
                warn!(%error, index = placed.index, "skipping glyph");
                report.skipped.push(placed.index);
            }
        }
    }

    if frame.caret_on && frame.layout.caret_visible(frame.viewport) {
        let top = frame.layout.caret;
        let bottom = top + Point::new(0.0, frame.font.size);
        canvas.stroke_line(top, bottom, palette::CARET_WIDTH, palette::CARET);
    }

    paint_scrollbars(&frame.scrollbars, frame.viewport, canvas);

    trace!(painted = report.painted, skipped = report.skipped.len(), "painted frame");

    report
}

fn paint_scrollbars(bars: &Scrollbars, viewport: Viewport, canvas: &mut dyn Canvas) {
    if let Some(thumb) = bars.vertical {
        let x = viewport.width - SCROLLBAR_WIDTH;
        canvas.fill_rect(Point::new(x, 0.0), SCROLLBAR_WIDTH, viewport.height, palette::SCROLL_TRACK);
        canvas.fill_rect(Point::new(x, thumb.start), SCROLLBAR_WIDTH, thumb.length, palette::SCROLL_THUMB);
    }

    if let Some(thumb) = bars.horizontal {
        let y = viewport.height - SCROLLBAR_WIDTH;
        canvas.fill_rect(Point::new(0.0, y), viewport.width, SCROLLBAR_WIDTH, palette::SCROLL_TRACK);
        canvas.fill_rect(Point::new(thumb.start, y), thumb.length, SCROLLBAR_WIDTH, palette::SCROLL_THUMB);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{RenderError, RenderResult};
    use crate::palette::Rgb;
    use editor_core::cursor::Cursor;
    use editor_core::text::TextBuffer;
    use layout::engine::LayoutParams;
    use layout::geometry::{ScrollOffset, TextDimensions};
    use layout::metrics::FixedAdvance;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Rect(Rgb),
        Glyph(char),
        Line(Point, Point),
    }

    /// Records draw calls and refuses to draw anything in `broken`.
    #[derive(Default)]
    struct RecordingCanvas {
        ops: Vec<Op>,
        broken: Vec<char>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, _viewport: Viewport) {
            self.ops.push(Op::Clear);
        }

        fn fill_rect(&mut self, _origin: Point, _width: f64, _height: f64, color: Rgb) {
            self.ops.push(Op::Rect(color));
        }

        fn draw_glyph(&mut self, glyph: char, _origin: Point, _font: &FontSettings) -> RenderResult<()> {
            if self.broken.contains(&glyph) {
                return Err(RenderError::Glyph {
                    glyph,
                    reason: "broken".to_owned(),
                });
            }

            self.ops.push(Op::Glyph(glyph));
            Ok(())
        }

        fn stroke_line(&mut self, from: Point, to: Point, _width: f64, _color: Rgb) {
            self.ops.push(Op::Line(from, to));
        }
    }

    fn setup(text: &str, cursor: Cursor) -> (Layout, FontSettings, Viewport) {
        let font = FontSettings::default();
        let viewport = Viewport::new(600.0, 400.0);
        let params = LayoutParams {
            font,
            scroll: ScrollOffset::ORIGIN,
            viewport,
            cursor,
        };
        let layout = layout::engine::layout(&TextBuffer::from_text(text), &params, &mut FixedAdvance::default());

        (layout, font, viewport)
    }

    fn frame<'a>(layout: &'a Layout, font: &'a FontSettings, viewport: Viewport, caret_on: bool) -> Frame<'a> {
        Frame {
            layout,
            font,
            viewport,
            scrollbars: Scrollbars::default(),
            caret_on,
        }
    }

    #[test]
    fn test_paints_every_glyph_and_the_caret() {
        let (layout, font, viewport) = setup("ab\nc", Cursor::new(1));
        let mut canvas = RecordingCanvas::default();

        let report = paint(&frame(&layout, &font, viewport, true), &mut canvas);

        assert_eq!(report.painted, 3);
        assert!(report.skipped.is_empty());
        assert_eq!(canvas.ops[0], Op::Clear);

        let caret = layout.caret;
        assert_eq!(
            canvas.ops.last(),
            Some(&Op::Line(caret, caret + Point::new(0.0, font.size)))
        );
    }

    #[test]
    fn test_caret_hidden_when_blinked_off() {
        let (layout, font, viewport) = setup("ab", Cursor::new(1));
        let mut canvas = RecordingCanvas::default();

        paint(&frame(&layout, &font, viewport, false), &mut canvas);

        assert!(!canvas.ops.iter().any(|op| matches!(op, Op::Line(..))));
    }

    #[test]
    fn test_selection_is_drawn_under_its_glyph() {
        let (layout, font, viewport) = setup("abc", Cursor::new_selection(1, 2));
        let mut canvas = RecordingCanvas::default();

        paint(&frame(&layout, &font, viewport, false), &mut canvas);

        assert_eq!(
            canvas.ops,
            vec![
                Op::Clear,
                Op::Glyph('a'),
                Op::Rect(palette::SELECTION),
                Op::Glyph('b'),
                Op::Glyph('c'),
            ]
        );
    }

    #[test]
    fn test_failed_glyph_is_skipped() {
        let (layout, font, viewport) = setup("a?b", Cursor::default());
        let mut canvas = RecordingCanvas {
            broken: vec!['?'],
            ..RecordingCanvas::default()
        };

        let report = paint(&frame(&layout, &font, viewport, false), &mut canvas);

        assert_eq!(report.painted, 2);
        assert_eq!(report.skipped, vec![1]);
        assert!(canvas.ops.contains(&Op::Glyph('b')));
    }

    #[test]
    fn test_scrollbars_paint_track_then_thumb() {
        let (layout, font, viewport) = setup("x", Cursor::default());
        let mut canvas = RecordingCanvas::default();
        let scrollbars = layout::scroll::scrollbars(
            TextDimensions {
                width: 100.0,
                height: 2000.0,
            },
            viewport,
            ScrollOffset::ORIGIN,
            font.angle_degrees,
        );

        paint(
            &Frame {
                scrollbars,
                ..frame(&layout, &font, viewport, false)
            },
            &mut canvas,
        );

        let tail = &canvas.ops[canvas.ops.len() - 2..];
        assert_eq!(
            tail,
            &[Op::Rect(palette::SCROLL_TRACK), Op::Rect(palette::SCROLL_THUMB)]
        );
    }
}
