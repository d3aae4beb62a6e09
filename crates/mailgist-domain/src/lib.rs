//! Mailgist Domain Layer
//!
//! This crate contains the core data model for mailgist. It defines the
//! parsed email record that every other layer consumes, the derived naming
//! rules for generated artifacts, and the trait interfaces for cross-cutting
//! capabilities.
//!
//! ## Key Concepts
//!
//! - **EmailMessage**: One parsed `.eml` file - headers, bodies, source path
//! - **Derived names**: Filesystem-safe stems computed from subject and date
//! - **Reporter**: Injected sink for pipeline diagnostics
//!
//! ## Architecture
//!
//! This crate stays at the bottom of the dependency graph:
//! - Data and naming rules only, no I/O
//! - Messages are immutable once constructed
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod message;
pub mod traits;

// Re-exports for convenience
pub use message::EmailMessage;
pub use traits::{NoopReporter, Reporter};
