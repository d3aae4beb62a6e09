//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Archive loading error
    #[error("Archive error: {0}")]
    Loader(#[from] mailgist_loader::LoaderError),

    /// Document rendering error
    #[error("Render error: {0}")]
    Render(#[from] mailgist_render::RenderError),

    /// Notion publishing error
    #[error("Notion error: {0}")]
    Notion(#[from] mailgist_notion::NotionError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
