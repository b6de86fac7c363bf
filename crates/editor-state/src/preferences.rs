use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use layout::font::{FontFamily, FontSettings};
use layout::geometry::ScrollOffset;
use tracing::{debug, info, warn};

use crate::errors::PreferencesError;

const APP_DIR: &str = "slant-pad";
const STORAGE_FILE: &str = "storage.json";

pub const CONTENT_KEY: &str = "diagonal-editor-content";
pub const SCROLL_KEY: &str = "diagonal-editor-scroll";
pub const FONT_TYPE_KEY: &str = "fontType";
pub const FONT_SIZE_KEY: &str = "fontSize";
pub const ANGLE_KEY: &str = "angle";
/// Where the angle used to live. Migrated to [`ANGLE_KEY`] once, then deleted.
pub const LEGACY_ANGLE_KEY: &str = "diagonal-editor-angle";

/// A flat string-to-string store persisted as one JSON object.
///
/// Writes land in memory and mark the store dirty; [`PreferencesStore::save`]
/// (or drop) writes the file.
#[derive(Debug)]
pub struct PreferencesStore {
    /// `None` keeps everything in memory.
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

/*

====================
===== CREATION =====
====================

*/

impl PreferencesStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or malformed file is
    /// logged and also treated as empty; it is overwritten on the next save.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(data) => match serde_json::from_slice::<BTreeMap<String, String>>(&data) {
                Ok(parsed) => parsed,
                Err(error) => {
                    warn!(?error, ?path, "failed to parse preferences");
                    BTreeMap::new()
                }
            },
            Err(error) => {
                if error.kind() != std::io::ErrorKind::NotFound {
                    warn!(?error, ?path, "failed to read preferences");
                }
                BTreeMap::new()
            }
        };

        debug!(?path, keys = entries.len(), "opened preferences");

        Self {
            path: Some(path),
            entries,
            dirty: false,
        }
    }

    /// Opens the store in the platform configuration directory.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError::NoConfigDir`] if the platform has none.
    pub fn open_default() -> Result<Self, PreferencesError> {
        let mut path = dirs::config_dir().ok_or(PreferencesError::NoConfigDir)?;
        path.push(APP_DIR);
        path.push(STORAGE_FILE);

        Ok(Self::open(path))
    }

    /// A store that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: BTreeMap::new(),
            dirty: false,
        }
    }
}

/*

=============================
===== KEY-VALUE METHODS =====
=============================

*/

impl PreferencesStore {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();

        if self.entries.get(key) != Some(&value) {
            self.entries.insert(key.to_owned(), value);
            self.dirty = true;
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.entries.remove(key);

        if removed.is_some() {
            self.dirty = true;
        }

        removed
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes the store if anything changed since the last save.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&mut self) -> Result<(), PreferencesError> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(path) = &self.path {
            write_entries(path, &self.entries)?;
        }

        self.dirty = false;
        Ok(())
    }
}

impl Drop for PreferencesStore {
    fn drop(&mut self) {
        if self.dirty
            && let Some(path) = &self.path
            && let Err(error) = write_entries(path, &self.entries)
        {
            warn!(?error, ?path, "failed to persist preferences during drop");
        }
    }
}

fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let data = serde_json::to_vec_pretty(entries)?;
    std::fs::write(path, data)?;

    Ok(())
}

/*

=========================
===== TYPED ACCESS =====
=========================

*/

impl PreferencesStore {
    /// Reads the font settings, falling back per field to the defaults.
    ///
    /// Also performs the one-time legacy angle migration: if the old key is
    /// present it is deleted, and its value becomes the angle only when the
    /// current key is absent.
    pub fn load_font_settings(&mut self) -> FontSettings {
        let defaults = FontSettings::default();

        if let Some(legacy) = self.remove(LEGACY_ANGLE_KEY) {
            info!(%legacy, "migrating legacy angle preference");

            if self.get(ANGLE_KEY).is_none() {
                self.set(ANGLE_KEY, legacy);
            }
        }

        let family = match self.get(FONT_TYPE_KEY) {
            Some(key) => FontFamily::from_key(key).unwrap_or_else(|| {
                warn!(key, "unknown font type, using default");
                defaults.family
            }),
            None => defaults.family,
        };

        FontSettings {
            family,
            size: self.parse_number(FONT_SIZE_KEY).unwrap_or(defaults.size),
            angle_degrees: self.parse_number(ANGLE_KEY).unwrap_or(defaults.angle_degrees),
        }
    }

    fn parse_number(&self, key: &str) -> Option<f64> {
        let raw = self.get(key)?;

        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                warn!(key, raw, "malformed number in preferences, using default");
                None
            }
        }
    }

    pub fn store_font_settings(&mut self, font: &FontSettings) {
        self.set(FONT_TYPE_KEY, font.family.key());
        self.set(FONT_SIZE_KEY, font.size.to_string());
        self.set(ANGLE_KEY, font.angle_degrees.to_string());
    }

    #[must_use]
    pub fn load_text(&self) -> String {
        self.get(CONTENT_KEY).unwrap_or_default().to_owned()
    }

    pub fn store_text(&mut self, text: &str) {
        self.set(CONTENT_KEY, text);
    }

    /// Reads the saved scroll offset. A malformed record falls back to the
    /// origin.
    #[must_use]
    pub fn load_scroll(&self) -> ScrollOffset {
        let Some(raw) = self.get(SCROLL_KEY) else {
            return ScrollOffset::ORIGIN;
        };

        serde_json::from_str(raw).unwrap_or_else(|error| {
            warn!(%error, raw, "failed to parse saved scroll offset");
            ScrollOffset::ORIGIN
        })
    }

    pub fn store_scroll(&mut self, scroll: ScrollOffset) {
        match serde_json::to_string(&scroll) {
            Ok(json) => self.set(SCROLL_KEY, json),
            Err(error) => warn!(%error, ?scroll, "failed to serialize scroll offset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let mut store = PreferencesStore::in_memory();

        assert_eq!(store.load_font_settings(), FontSettings::default());
        assert_eq!(store.load_text(), "");
        assert_eq!(store.load_scroll(), ScrollOffset::ORIGIN);
    }

    #[test]
    fn test_legacy_angle_migrates_when_new_key_absent() {
        let mut store = PreferencesStore::in_memory();
        store.set(LEGACY_ANGLE_KEY, "33");

        let font = store.load_font_settings();

        assert_eq!(font.angle_degrees, 33.0);
        assert_eq!(store.get(ANGLE_KEY), Some("33"));
        assert_eq!(store.get(LEGACY_ANGLE_KEY), None);
    }

    #[test]
    fn test_legacy_angle_dropped_when_new_key_present() {
        let mut store = PreferencesStore::in_memory();
        store.set(LEGACY_ANGLE_KEY, "33");
        store.set(ANGLE_KEY, "12");

        let font = store.load_font_settings();

        assert_eq!(font.angle_degrees, 12.0);
        assert_eq!(store.get(LEGACY_ANGLE_KEY), None);
    }

    #[test]
    fn test_malformed_numbers_fall_back() {
        let mut store = PreferencesStore::in_memory();
        store.set(FONT_SIZE_KEY, "huge");
        store.set(ANGLE_KEY, "NaN");
        store.set(FONT_TYPE_KEY, "gothic");

        assert_eq!(store.load_font_settings(), FontSettings::default());
    }

    #[test]
    fn test_malformed_scroll_falls_back_to_origin() {
        let mut store = PreferencesStore::in_memory();
        store.set(SCROLL_KEY, "{\"x\": 4");

        assert_eq!(store.load_scroll(), ScrollOffset::ORIGIN);

        store.set(SCROLL_KEY, "[1, 2, 3]");
        assert_eq!(store.load_scroll(), ScrollOffset::ORIGIN);
    }

    #[test]
    fn test_scroll_round_trip() {
        let mut store = PreferencesStore::in_memory();

        store.store_scroll(ScrollOffset::new(-12.5, 300.0));

        assert_eq!(store.load_scroll(), ScrollOffset::new(-12.5, 300.0));
    }

    #[test]
    fn test_font_settings_round_trip() {
        let mut store = PreferencesStore::in_memory();
        let font = FontSettings {
            family: FontFamily::Default,
            size: 24.0,
            angle_degrees: 45.0,
        };

        store.store_font_settings(&font);

        assert_eq!(store.get(FONT_TYPE_KEY), Some("default"));
        assert_eq!(store.get(FONT_SIZE_KEY), Some("24"));
        assert_eq!(store.load_font_settings(), font);
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = PreferencesStore::open(&path);
        store.store_text("AB\nC");
        store.save().unwrap();
        assert!(!store.is_dirty());

        let reopened = PreferencesStore::open(&path);
        assert_eq!(reopened.load_text(), "AB\nC");
    }

    #[test]
    fn test_drop_flushes_dirty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        {
            let mut store = PreferencesStore::open(&path);
            store.set(ANGLE_KEY, "15");
        }

        assert_eq!(PreferencesStore::open(&path).get(ANGLE_KEY), Some("15"));
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = PreferencesStore::open(&path);

        assert_eq!(store.get(CONTENT_KEY), None);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_unchanged_set_stays_clean() {
        let mut store = PreferencesStore::in_memory();
        store.set(ANGLE_KEY, "8");
        store.save().unwrap();

        store.set(ANGLE_KEY, "8");

        assert!(!store.is_dirty());
    }
}
