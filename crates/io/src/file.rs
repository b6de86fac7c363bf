use std::io::Write;

use tracing::{debug, info};

/// Accepted document kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    Markdown,
}

impl FileKind {
    /// Classifies a file by MIME type (when the platform reports one) or by
    /// extension. Either is enough.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::UnsupportedType`] for anything that is neither
    /// plain text nor markdown.
    ///
    /// [`FileError::UnsupportedType`]: crate::errors::FileError::UnsupportedType
    pub fn detect(path: &std::path::Path, mime: Option<&str>) -> crate::errors::FileResult<Self> {
        match mime {
            Some("text/plain") => return Ok(FileKind::PlainText),
            Some("text/markdown") => return Ok(FileKind::Markdown),
            _ => {}
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("txt") => Ok(FileKind::PlainText),
            Some("md") => Ok(FileKind::Markdown),
            _ => Err(crate::errors::FileError::UnsupportedType {
                name: path.display().to_string(),
            }),
        }
    }
}

/// Reads a text or markdown file into a `String`.
///
/// Invalid UTF-8 is replaced rather than rejected. Everything else, `\r`
/// included, comes back exactly as stored, so a saved buffer reloads
/// unchanged.
///
/// # Errors
///
/// - [`FileError::UnsupportedType`] before touching the disk, if the file is
///   not text or markdown.
/// - [`FileError::Io`] if the file cannot be opened or mapped.
///
/// [`FileError::UnsupportedType`]: crate::errors::FileError::UnsupportedType
/// [`FileError::Io`]: crate::errors::FileError::Io
pub fn load_text(
    path: impl AsRef<std::path::Path>,
    mime: Option<&str>,
) -> crate::errors::FileResult<String> {
    let path = path.as_ref();
    let kind = FileKind::detect(path, mime)?;

    // Zero-length files have nothing to map.
    if std::fs::metadata(path)?.len() == 0 {
        debug!(?path, ?kind, "loaded empty file");
        return Ok(String::new());
    }

    let mmap = crate::mmap::MmapFile::open(path)?;
    let text = String::from_utf8_lossy(mmap.as_slice()).into_owned();

    info!(?path, ?kind, bytes = mmap.as_slice().len(), "loaded file");

    Ok(text)
}

/// Builds the download name for a save made at `now`, e.g.
/// `slant_pad_2025-03-14_09-26-53.txt`.
#[must_use]
pub fn save_file_name(now: chrono::DateTime<chrono::Utc>) -> String {
    now.format("slant_pad_%Y-%m-%d_%H-%M-%S.txt").to_string()
}

/// Writes `text` into `dir` under a timestamp-derived name and returns the
/// final path.
///
/// The bytes go to a temporary file in the same directory first, which is
/// then atomically renamed into place.
///
/// # Errors
///
/// - [`FileError::EmptyBuffer`] when `text` is empty.
/// - [`FileError::Io`] if the temporary file cannot be written or persisted.
///
/// [`FileError::EmptyBuffer`]: crate::errors::FileError::EmptyBuffer
/// [`FileError::Io`]: crate::errors::FileError::Io
pub fn save_text(
    dir: impl AsRef<std::path::Path>,
    text: &str,
    now: chrono::DateTime<chrono::Utc>,
) -> crate::errors::FileResult<std::path::PathBuf> {
    if text.is_empty() {
        return Err(crate::errors::FileError::EmptyBuffer);
    }

    let dir = dir.as_ref();
    let target = dir.join(save_file_name(now));

    // Same directory as the target, otherwise the rename may cross devices.
    let mut temp_save_file = tempfile::Builder::new()
        .prefix(".save_tmp_")
        .tempfile_in(dir)?;

    temp_save_file.write_all(text.as_bytes())?;
    temp_save_file.as_file().sync_all()?;
    temp_save_file.persist(&target).map_err(|e| e.error)?;

    info!(path = ?target, bytes = text.len(), "saved file");

    Ok(target)
}
