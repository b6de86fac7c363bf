pub type TextBufferResult<T> = Result<T, TextBufferError>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextBufferError {
    /// A code-point index past the end of the buffer.
    #[error("index {index} out of bounds (len={len})")]
    IndexOutOfBounds { index: usize, len: usize },
    /// A range whose start lies after its end.
    #[error("invalid range {start}..{end}")]
    InvalidRange { start: usize, end: usize },
}
