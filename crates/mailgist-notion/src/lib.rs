//! # Mailgist Notion
//!
//! Publishes summarized messages to a Notion database.
//!
//! The database is expected to carry a fixed set of properties (`Name`,
//! `Sender`, `Date`, `Recipients`, `Key Points`, `Status`); the schema is
//! validated before anything is written, so drift fails fast instead of
//! producing half-filled records. Records that already exist, matched by
//! subject and calendar date, are skipped rather than overwritten.
//!
//! # Overview
//!
//! - [`NotionClient`]: narrow async client over the REST endpoints used
//!   here, with retry and exponential backoff on transient failures.
//! - [`export_messages`]: the batch loop, returning an [`ExportOutcome`]
//!   with created page ids and skip/failure counts.
//! - [`NotionError`]: the closed error set callers match on.
//!
//! # Example Usage
//!
//! ```no_run
//! use mailgist_domain::EmailMessage;
//! use mailgist_notion::{export_messages, ExportItem, NotionClient};
//!
//! # async fn run() -> Result<(), mailgist_notion::NotionError> {
//! let client = NotionClient::new("secret_token", "database_id");
//! let message = EmailMessage::default();
//! let items = vec![ExportItem {
//!     message: &message,
//!     key_points: vec!["The review moved to Thursday.".to_string()],
//!     pdf_url: None,
//! }];
//! let outcome = export_messages(&client, &items).await?;
//! println!("created {} pages", outcome.created.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod error;
mod export;

pub use client::{truncate_for_notion, NotionClient, MAX_TEXT_LEN, NOTION_VERSION, STATUS_PROCESSED};
pub use error::NotionError;
pub use export::{export_messages, ExportItem, ExportOutcome};
