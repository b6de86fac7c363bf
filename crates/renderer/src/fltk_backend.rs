use fltk::enums::{Align, Color, Font, LineStyle};
use layout::errors::LayoutError;
use layout::font::{FontFamily, FontSettings};
use layout::geometry::{Point, Viewport};
use layout::metrics::GlyphMeasurer;
use tracing::{info, warn};

use crate::canvas::Canvas;
use crate::errors::{RenderError, RenderResult};
use crate::palette::{self, Rgb};

/// Installed faces tried, in order, for the handwriting family.
const HANDWRITING_FACES: [&str; 6] = [
    "Klee One",
    "Comic Sans MS",
    "Segoe Print",
    "Bradley Hand",
    "Chalkboard",
    "URW Chancery L",
];

/// The fltk font behind each [`FontFamily`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontFaces {
    pub default: Font,
    pub handwriting: Font,
}

impl FontFaces {
    /// Looks the handwriting face up among the loaded system fonts. Falls
    /// back to Times when none is installed.
    ///
    /// Call after system fonts have been loaded into the app.
    #[must_use]
    pub fn resolve() -> Self {
        let handwriting = HANDWRITING_FACES
            .iter()
            .find_map(|name| fltk::app::font_index(name).map(|idx| (name, Font::by_index(idx))));

        let handwriting = match handwriting {
            Some((name, font)) => {
                info!(name, "using handwriting face");
                font
            }
            None => {
                warn!("no handwriting face installed, falling back to Times");
                Font::Times
            }
        };

        Self {
            default: Font::Helvetica,
            handwriting,
        }
    }

    #[inline]
    #[must_use]
    pub fn font_for(&self, family: FontFamily) -> Font {
        match family {
            FontFamily::Default => self.default,
            FontFamily::Handwriting => self.handwriting,
        }
    }
}

impl Default for FontFaces {
    fn default() -> Self {
        Self {
            default: Font::Helvetica,
            handwriting: Font::Times,
        }
    }
}

#[inline]
fn color(rgb: Rgb) -> Color {
    Color::from_rgb(rgb.0, rgb.1, rgb.2)
}

#[inline]
fn px(value: f64) -> i32 {
    value.round() as i32
}

#[inline]
fn font_px(font: &FontSettings) -> i32 {
    px(font.size).max(1)
}

/// The character fltk is asked to measure and draw for `glyph`.
///
/// Tab, carriage return and form feed stand in as a space. Other control
/// characters have no form and yield `None`.
#[inline]
fn drawn_form(glyph: char) -> Option<char> {
    match glyph {
        '\t' | '\r' | '\u{c}' => Some(' '),
        _ if glyph.is_control() => None,
        _ => Some(glyph),
    }
}

/// Advance of `glyph`, with `width` doing the actual text measurement.
fn advance_with(glyph: char, mut width: impl FnMut(&str) -> f64) -> Result<f64, LayoutError> {
    let Some(form) = drawn_form(glyph) else {
        return Err(LayoutError::Measure {
            glyph,
            reason: "control character has no advance".to_owned(),
        });
    };

    let mut buf = [0u8; 4];
    Ok(width(form.encode_utf8(&mut buf)))
}

/*

==================
===== CANVAS =====
==================

*/

/// Draws through `fltk::draw`. Only valid inside a widget's draw callback.
///
/// Canvas coordinates are shifted by the widget's on-window position.
#[derive(Clone, Copy, Debug)]
pub struct FltkCanvas {
    origin_x: i32,
    origin_y: i32,
    faces: FontFaces,
}

impl FltkCanvas {
    #[must_use]
    pub fn new(origin_x: i32, origin_y: i32, faces: FontFaces) -> Self {
        Self {
            origin_x,
            origin_y,
            faces,
        }
    }

    #[inline]
    fn to_window(&self, point: Point) -> (i32, i32) {
        (self.origin_x + px(point.x), self.origin_y + px(point.y))
    }
}

impl Canvas for FltkCanvas {
    fn clear(&mut self, viewport: Viewport) {
        fltk::draw::draw_rect_fill(
            self.origin_x,
            self.origin_y,
            px(viewport.width),
            px(viewport.height),
            color(palette::BACKGROUND),
        );
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, rgb: Rgb) {
        let (x, y) = self.to_window(origin);
        fltk::draw::draw_rect_fill(x, y, px(width).max(1), px(height).max(1), color(rgb));
    }

    fn draw_glyph(&mut self, glyph: char, origin: Point, font: &FontSettings) -> RenderResult<()> {
        let Some(form) = drawn_form(glyph) else {
            return Err(RenderError::Glyph {
                glyph,
                reason: "control character".to_owned(),
            });
        };

        if form == ' ' {
            return Ok(());
        }

        let (x, y) = self.to_window(origin);
        let mut buf = [0u8; 4];
        let text = form.encode_utf8(&mut buf);
        let size = font_px(font);

        fltk::draw::set_font(self.faces.font_for(font.family), size);
        fltk::draw::set_draw_color(color(palette::TEXT));

        let width = px(fltk::draw::width(text)).max(1);
        fltk::draw::draw_text2(text, x, y, width, size, Align::TopLeft);

        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, rgb: Rgb) {
        let (x1, y1) = self.to_window(from);
        let (x2, y2) = self.to_window(to);

        fltk::draw::set_draw_color(color(rgb));
        fltk::draw::set_line_style(LineStyle::Solid, px(width).max(1));
        fltk::draw::draw_line(x1, y1, x2, y2);
        fltk::draw::set_line_style(LineStyle::Solid, 0);
    }
}

/*

====================
===== MEASURER =====
====================

*/

/// Measures advance widths with the same fonts [`FltkCanvas`] draws with.
///
/// Needs the fltk display to be open.
#[derive(Clone, Copy, Debug, Default)]
pub struct FltkMeasurer {
    faces: FontFaces,
}

impl FltkMeasurer {
    #[must_use]
    pub fn new(faces: FontFaces) -> Self {
        Self { faces }
    }
}

impl GlyphMeasurer for FltkMeasurer {
    fn measure(&mut self, glyph: char, font: &FontSettings) -> Result<f64, LayoutError> {
        let face = self.faces.font_for(font.family);

        advance_with(glyph, |text| {
            fltk::draw::set_font(face, font_px(font));
            fltk::draw::width(text)
        })
    }
}
