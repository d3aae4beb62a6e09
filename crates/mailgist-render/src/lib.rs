//! # Mailgist Render
//!
//! Turns parsed email messages into the files a reader actually opens:
//! per-message PDFs, per-message RTFs, and a single HTML digest that links
//! everything together.
//!
//! ## Outputs
//!
//! - **PDF** ([`write_pdf`], [`render_pdfs`]): US-letter pages, built-in
//!   Helvetica, subject as title, then the header block and the full body.
//! - **RTF** ([`write_rtf`], [`render_rtfs`]): the same content as a
//!   hand-assembled RTF document for editing after the fact.
//! - **Digest** ([`write_report`]): one HTML page of key points per message,
//!   newest first, with `file://` links back to the originals and PDFs.
//!
//! Batch drivers never abort on a single bad message; failures are logged
//! and the rest of the run continues.
//!
//! ## Example Usage
//!
//! ```no_run
//! use mailgist_domain::EmailMessage;
//! use mailgist_render::{render_pdfs, write_report, DigestEntry};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), mailgist_render::RenderError> {
//! let messages: Vec<EmailMessage> = vec![/* loaded elsewhere */];
//! let pdf_paths = render_pdfs(&messages, Path::new("output/pdfs"))?;
//!
//! let entries: Vec<DigestEntry> = messages
//!     .iter()
//!     .zip(pdf_paths)
//!     .map(|(message, pdf_path)| DigestEntry {
//!         message,
//!         key_points: vec![],
//!         pdf_path,
//!     })
//!     .collect();
//! write_report(&entries, Path::new("output/email_summary.html"))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
mod error;
pub mod paths;
mod pdf;
mod report;
mod rtf;

pub use document::sanitize_for_layout;
pub use error::RenderError;
pub use paths::{deduplicate_path, file_url};
pub use pdf::{render_pdfs, write_pdf};
pub use report::{render_report, write_report, DigestEntry};
pub use rtf::{escape_rtf, render_rtfs, write_rtf};
