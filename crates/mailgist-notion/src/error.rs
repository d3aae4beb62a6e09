//! Error types for the Notion publisher.

use thiserror::Error;

/// Errors surfaced by the Notion client.
///
/// Every HTTP and transport failure is mapped into one of these four cases
/// at the client boundary; callers never see raw status codes.
#[derive(Error, Debug)]
pub enum NotionError {
    /// The integration token was rejected.
    #[error("Notion rejected the integration token (HTTP 401)")]
    Unauthorized,

    /// The database or page does not exist or is not shared with the
    /// integration.
    #[error("Notion resource not found: {0}")]
    NotFound(String),

    /// The target database does not carry the expected properties, or
    /// Notion rejected a request payload.
    #[error("database schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Rate limiting, server errors and transport failures. These are
    /// retried with backoff before being returned.
    #[error("transient Notion failure: {0}")]
    Transient(String),
}
