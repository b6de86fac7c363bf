//! Geometry core of the slanted editor.
//!
//! - [`engine`] maps a [`editor_core::text::TextBuffer`] onto canvas
//!   coordinates along a rotated baseline, producing one [`geometry::CharBox`]
//!   per character slot.
//! - [`hit_test`] maps a pointer position back onto a character index.
//! - [`scroll`] and [`gesture`] own the viewport offset and how wheel, pan and
//!   scrollbar-thumb input move it.
//!
//! Nothing in here talks to a toolkit: glyph widths come in through
//! [`metrics::GlyphMeasurer`].
pub mod engine;
pub mod errors;
pub mod font;
pub mod geometry;
pub mod gesture;
pub mod hit_test;
pub mod metrics;
pub mod scroll;
