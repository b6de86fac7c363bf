/// An opaque sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND: Rgb = Rgb(255, 255, 255);
pub const TEXT: Rgb = Rgb(0, 0, 0);
/// `rgba(0, 192, 255, 0.3)` composited over the white background.
pub const SELECTION: Rgb = Rgb(179, 236, 255);
pub const CARET: Rgb = Rgb(0, 192, 192);
pub const SCROLL_TRACK: Rgb = Rgb(241, 241, 241);
pub const SCROLL_THUMB: Rgb = Rgb(160, 160, 160);

/// Caret stroke width in pixels.
pub const CARET_WIDTH: f64 = 2.0;
