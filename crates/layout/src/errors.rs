#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LayoutError {
    /// The measurer could not produce a width for this glyph.
    #[error("cannot measure {glyph:?}: {reason}")]
    Measure { glyph: char, reason: String },
    /// The measured advance is negative, infinite or NaN.
    #[error("invalid advance {width} for {glyph:?}")]
    InvalidAdvance { glyph: char, width: f64 },
}
