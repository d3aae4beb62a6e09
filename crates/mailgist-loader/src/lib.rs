//! Mailgist Loader
//!
//! Finds and parses archived `.eml` files into
//! [`EmailMessage`](mailgist_domain::EmailMessage) records.
//!
//! # Overview
//!
//! The loader is the only place raw message bytes are touched. It validates
//! that a file actually looks like email before handing it to the MIME
//! parser, decodes headers (RFC 2047) and charsets through `mail-parser`,
//! and picks the first plain and first HTML body parts in document order.
//! Directory scans skip symlinks and keep going past broken files.
//!
//! # Example Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! fn main() -> Result<(), mailgist_loader::LoaderError> {
//!     let messages = mailgist_loader::scan_directory(Path::new("./input"))?;
//!     for message in &messages {
//!         println!("{}: {}", message.logical_filename(), message.sender);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod eml;
mod error;
mod scan;

pub use eml::{is_valid_eml_file, parse_eml_file};
pub use error::LoaderError;
pub use scan::scan_directory;
