/// A read-only memory map over a file picked for loading.
///
/// The map is only held for as long as it takes to decode the content; the
/// editor never edits in place.
#[derive(Debug)]
pub struct MmapFile {
    _file: std::fs::File,
    mmap: memmap2::Mmap,
}

impl MmapFile {
    /// # Errors
    ///
    /// - `std::io::Error` if the file cannot be opened or mapped.
    pub fn open(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;

        // SAFETY:
        // - File is opened read-only
        // - The handle lives as long as the map
        // - Callers only ever see an immutable &[u8]
        let mmap = unsafe { memmap2::Mmap::map(&file)? };

        Ok(Self {
            _file: file,
            mmap,
        })
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.mmap
    }
}
