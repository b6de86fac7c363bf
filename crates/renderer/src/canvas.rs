use layout::font::FontSettings;
use layout::geometry::{Point, Viewport};

use crate::errors::RenderResult;
use crate::palette::Rgb;

/// A 2D surface in canvas coordinates, origin at the top-left of the
/// editing area.
pub trait Canvas {
    /// Fills the whole viewport with the background.
    fn clear(&mut self, viewport: Viewport);

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, color: Rgb);

    /// Draws `glyph` upright with its top-left corner at `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Glyph`] if the glyph cannot be drawn. Painting
    /// carries on with the next one.
    ///
    /// [`RenderError::Glyph`]: crate::errors::RenderError::Glyph
    fn draw_glyph(&mut self, glyph: char, origin: Point, font: &FontSettings) -> RenderResult<()>;

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgb);
}
