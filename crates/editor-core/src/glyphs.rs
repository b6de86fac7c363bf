//! Display-mode glyph substitution.
//!
//! In vertical presentation some CJK punctuation reads wrong unless it is
//! swapped for its Unicode vertical form (U+FE10..U+FE4F, plus a couple of
//! conventional stand-ins). The swap is purely visual: the buffer keeps the
//! character the user typed, while layout measures and paints the substitute.

use crate::enums::DisplayMode;

/// (horizontal, vertical) pairs. Each side is unique, so the table is its
/// own inverse.
const VERTICAL_FORMS: &[(char, char)] = &[
    ('、', '︑'),
    ('。', '︒'),
    ('，', '︐'),
    ('：', '︓'),
    ('；', '︔'),
    ('！', '︕'),
    ('？', '︖'),
    ('…', '︙'),
    ('‥', '︰'),
    ('—', '︱'),
    ('–', '︲'),
    ('＿', '︳'),
    ('（', '︵'),
    ('）', '︶'),
    ('｛', '︷'),
    ('｝', '︸'),
    ('〔', '︹'),
    ('〕', '︺'),
    ('【', '︻'),
    ('】', '︼'),
    ('《', '︽'),
    ('》', '︾'),
    ('〈', '︿'),
    ('〉', '﹀'),
    ('「', '﹁'),
    ('」', '﹂'),
    ('『', '﹃'),
    ('』', '﹄'),
    ('［', '﹇'),
    ('］', '﹈'),
    ('ー', '丨'),
    ('～', '≀'),
];

/// Returns the glyph to draw for `ch` in the given mode.
#[must_use]
pub fn display_glyph(ch: char, mode: DisplayMode) -> char {
    match mode {
        DisplayMode::Vertical => to_vertical(ch),
        DisplayMode::Horizontal => to_horizontal(ch),
    }
}

#[must_use]
pub fn to_vertical(ch: char) -> char {
    VERTICAL_FORMS
        .iter()
        .find(|(horizontal, _)| *horizontal == ch)
        .map_or(ch, |(_, vertical)| *vertical)
}

#[must_use]
pub fn to_horizontal(ch: char) -> char {
    VERTICAL_FORMS
        .iter()
        .find(|(_, vertical)| *vertical == ch)
        .map_or(ch, |(horizontal, _)| *horizontal)
}
