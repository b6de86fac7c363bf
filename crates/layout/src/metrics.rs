/// Source of glyph advance widths.
///
/// The toolkit-backed implementation lives in the renderer; layout only needs
/// a number per glyph.
pub trait GlyphMeasurer {
    /// Advance width of `glyph` in pixels, letter spacing excluded.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Measure`] when no width can be determined. The
    /// engine skips that one character and carries on.
    ///
    /// [`LayoutError::Measure`]: crate::errors::LayoutError::Measure
    fn measure(
        &mut self,
        glyph: char,
        font: &crate::font::FontSettings,
    ) -> Result<f64, crate::errors::LayoutError>;
}

/// Gives every glyph the same advance, `ratio * font.size`.
///
/// Used headless (tests, tooling) where no font rasterizer is available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub ratio: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { ratio: 0.5 }
    }
}

impl GlyphMeasurer for FixedAdvance {
    fn measure(
        &mut self,
        _glyph: char,
        font: &crate::font::FontSettings,
    ) -> Result<f64, crate::errors::LayoutError> {
        Ok(self.ratio * font.size)
    }
}

impl<M: GlyphMeasurer + ?Sized> GlyphMeasurer for Box<M> {
    fn measure(
        &mut self,
        glyph: char,
        font: &crate::font::FontSettings,
    ) -> Result<f64, crate::errors::LayoutError> {
        (**self).measure(glyph, font)
    }
}
