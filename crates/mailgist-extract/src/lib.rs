//! Mailgist Extract
//!
//! Turns raw email bodies into text the summarizer can work with.
//!
//! # Overview
//!
//! Email bodies arrive in two shapes: HTML (newsletters, marketing mail,
//! most modern clients) and plain text. Both carry machinery that drowns the
//! actual signal - tracking links, invisible characters, layout spacers,
//! inline base64 payloads. This crate converts HTML to text and strips that
//! machinery with a fixed, documented sequence of rules.
//!
//! # Architecture
//!
//! ```text
//! HTML body  → DOM filter → text conversion ┐
//!                                           ├→ noise rules → clean text
//! plain body ───────────────────────────────┘
//! ```
//!
//! Two cleaning strengths exist on purpose: [`html_to_text`] /
//! [`clean_noise`] feed the summarizer and cut aggressively, while
//! [`document_text`] keeps readable prose for the file renderers.
//!
//! # Example Usage
//!
//! ```
//! let text = mailgist_extract::html_to_text(
//!     "<html><body><p>Quarterly numbers are up.</p>\
//!      <script>track();</script></body></html>",
//! );
//! assert_eq!(text, "Quarterly numbers are up.");
//! ```

#![warn(missing_docs)]

pub mod html;
pub mod noise;

pub use html::{document_text, html_to_text};
pub use noise::clean_noise;
