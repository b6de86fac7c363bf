//! File plumbing: memory-mapped reads and atomic, timestamp-named writes of
//! the plain-text buffer.
pub mod errors;
pub mod file;
pub mod mmap;
