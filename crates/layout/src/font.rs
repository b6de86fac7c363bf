use editor_core::enums::DisplayMode;

/// Letter spacing at 0° and 90°, as a fraction of the font size.
pub const BASE_LETTER_SPACING: f64 = 0.1;
/// Extra letter spacing reached at 45°, as a fraction of the font size.
pub const MAX_EXTRA_LETTER_SPACING: f64 = 0.14;

/// Sizes offered by the toolbar.
pub const FONT_SIZE_OPTIONS: [u16; 10] = [8, 10, 12, 14, 16, 18, 20, 24, 28, 32];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontFamily {
    Default,
    #[default]
    Handwriting,
}

impl FontFamily {
    /// The value stored under the font-type preference key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            FontFamily::Default => "default",
            FontFamily::Handwriting => "handwriting",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "default" => Some(FontFamily::Default),
            "handwriting" => Some(FontFamily::Handwriting),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FontFamily::Default => "Default Font",
            FontFamily::Handwriting => "Handwriting Font",
        }
    }
}

/// Session-wide font configuration.
///
/// `angle_degrees` is whatever the caller set; the engine does not clamp it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSettings {
    pub family: FontFamily,
    pub size: f64,
    pub angle_degrees: f64,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            family: FontFamily::Handwriting,
            size: 18.0,
            angle_degrees: 8.0,
        }
    }
}

impl FontSettings {
    /// Baseline angle in radians.
    #[inline]
    #[must_use]
    pub fn theta(&self) -> f64 {
        self.angle_degrees.to_radians()
    }

    /// Extra space after every glyph. Widest at 45°, where diagonal glyphs
    /// crowd each other most.
    #[must_use]
    pub fn letter_spacing(&self) -> f64 {
        let factor = (self.theta() * 2.0).sin();

        (BASE_LETTER_SPACING + MAX_EXTRA_LETTER_SPACING * factor) * self.size
    }

    #[inline]
    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::for_angle(self.angle_degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font(angle_degrees: f64, size: f64) -> FontSettings {
        FontSettings {
            family: FontFamily::Default,
            size,
            angle_degrees,
        }
    }

    #[test]
    fn test_letter_spacing_peaks_at_45() {
        let flat = font(0.0, 16.0).letter_spacing();
        let diagonal = font(45.0, 16.0).letter_spacing();
        let upright = font(90.0, 16.0).letter_spacing();

        assert!((flat - 1.6).abs() < 1e-9);
        assert!((diagonal - 3.84).abs() < 1e-9);
        assert!((upright - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_display_mode_threshold() {
        assert_eq!(font(60.0, 16.0).display_mode(), DisplayMode::Horizontal);
        assert_eq!(font(61.0, 16.0).display_mode(), DisplayMode::Vertical);
    }

    #[test]
    fn test_family_keys_round_trip() {
        for family in [FontFamily::Default, FontFamily::Handwriting] {
            assert_eq!(FontFamily::from_key(family.key()), Some(family));
        }
        assert_eq!(FontFamily::from_key("comic"), None);
    }
}
