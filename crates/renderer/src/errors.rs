pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("cannot draw {glyph:?}: {reason}")]
    Glyph { glyph: char, reason: String },
}
