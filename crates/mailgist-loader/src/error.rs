//! Error types for the loader

use thiserror::Error;

/// Errors that can occur while loading email files
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Filesystem error while reading or scanning
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File does not carry enough email headers to be treated as a message
    #[error("not an email file: {0}")]
    NotAnEmail(String),

    /// File looked like email but the MIME parser rejected it
    #[error("unparseable email file: {0}")]
    Unparseable(String),
}
