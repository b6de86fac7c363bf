//! Paints a [`layout::engine::Layout`] onto a drawing surface.
//!
//! Painting is split from the toolkit: [`paint::paint`] talks to the
//! [`canvas::Canvas`] trait, and [`fltk_backend`] provides the fltk
//! implementation of both that trait and the layout's glyph measurer.
pub mod canvas;
pub mod errors;
pub mod fltk_backend;
pub mod paint;
pub mod palette;
