//! Session state for one editor window.
//!
//! - [`session::Session`] owns the text, caret, scroll offset, font settings
//!   and the cached layout, and is the only thing input handlers mutate.
//! - [`preferences::PreferencesStore`] persists what should survive a
//!   restart: the text, the scroll offset and the font choices.
pub mod errors;
pub mod preferences;
pub mod session;
