/// Orientation the glyphs are presented in.
///
/// The logical text never changes with the mode; only the glyph drawn (and
/// measured) for some punctuation does. See [`crate::glyphs`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Horizontal,
    Vertical,
}

impl DisplayMode {
    /// Baseline angles strictly above this switch to vertical presentation.
    pub const VERTICAL_THRESHOLD_DEGREES: f64 = 60.0;

    #[inline]
    #[must_use]
    pub fn for_angle(angle_degrees: f64) -> Self {
        if angle_degrees > Self::VERTICAL_THRESHOLD_DEGREES {
            DisplayMode::Vertical
        } else {
            DisplayMode::Horizontal
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}
