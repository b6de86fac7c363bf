#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    File(#[from] io::errors::FileError),
    #[error(transparent)]
    Text(#[from] editor_core::errors::TextBufferError),
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
}
