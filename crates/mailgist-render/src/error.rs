//! Error types for document rendering.

use thiserror::Error;

/// Errors that can occur while writing rendered documents.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Filesystem error while creating or writing an output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF backend rejected the document.
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}
