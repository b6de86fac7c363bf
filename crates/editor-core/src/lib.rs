//! Text model for the slanted editor: the code-point buffer, the caret and
//! selection, display-mode glyph substitution and arrow-key navigation.
pub mod cursor;
pub mod enums;
pub mod errors;
pub mod glyphs;
pub mod navigation;
pub mod text;
