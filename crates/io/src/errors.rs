pub type FileResult<T> = Result<T, FileError>;

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// Only plain text and markdown are accepted. The message is meant to be
    /// shown to the user as is.
    #[error("Please select a .txt or .md file")]
    UnsupportedType { name: String },
    /// Saving is disabled while the buffer is empty.
    #[error("nothing to save: the buffer is empty")]
    EmptyBuffer,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
