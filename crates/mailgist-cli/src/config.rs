//! Configuration management for the CLI.
//!
//! Settings live in `~/.mailgist/config.toml` and fill in whatever the
//! command line left unspecified: the precedence is always flag, then
//! environment, then config file, then built-in default (clap folds the
//! environment into the flag values before they reach this module).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Summarization settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Notion credentials
    #[serde(default)]
    pub notion: NotionConfig,
}

/// Where generated documents and processed mail end up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory generated documents are written into
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Directory processed .eml files are moved into; defaults to a
    /// `processed` directory inside the input directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_dir: Option<PathBuf>,
}

/// Summarization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Key points to extract per message
    #[serde(default = "default_sentences")]
    pub sentences: usize,
}

/// Notion credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Target database id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".mailgist").join("config.toml"))
    }

    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Effective sentence count: flag value over file value, never below 1.
    pub fn sentences(&self, flag: Option<usize>) -> usize {
        flag.unwrap_or(self.summary.sentences).max(1)
    }

    /// Effective output directory.
    pub fn output_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.output.dir.clone())
    }

    /// Effective processed directory for a given input directory.
    pub fn processed_dir(&self, flag: Option<PathBuf>, input_dir: &Path) -> PathBuf {
        flag.or_else(|| self.output.processed_dir.clone())
            .unwrap_or_else(|| input_dir.join("processed"))
    }

    /// Effective Notion credentials, or a configuration error naming what
    /// is missing.
    pub fn notion_credentials(
        &self,
        token_flag: Option<String>,
        database_flag: Option<String>,
    ) -> Result<(String, String)> {
        let token = token_flag.or_else(|| self.notion.token.clone()).ok_or_else(|| {
            CliError::Config(
                "No Notion token. Pass --notion-token, set NOTION_TOKEN, or add it under [notion] in the config file".into(),
            )
        })?;
        let database_id = database_flag
            .or_else(|| self.notion.database_id.clone())
            .ok_or_else(|| {
                CliError::Config(
                    "No Notion database id. Pass --notion-database-id, set NOTION_DATABASE_ID, or add it under [notion] in the config file".into(),
                )
            })?;
        Ok((token, database_id))
    }

    /// Effective Notion token alone (database creation needs no database id).
    pub fn notion_token(&self, token_flag: Option<String>) -> Result<String> {
        let (token, _) = self.notion_credentials(token_flag, Some(String::new()))?;
        Ok(token)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            processed_dir: None,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            sentences: default_sentences(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_sentences() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert_eq!(config.summary.sentences, 3);
        assert!(config.notion.token.is_none());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str("[summary]\nsentences = 5\n").unwrap();
        assert_eq!(config.summary.sentences, 5);
        assert_eq!(config.output.dir, PathBuf::from("output"));
    }

    #[test]
    fn test_full_file_round_trip() {
        let source = r#"
[output]
dir = "docs"
processed_dir = "/archive/done"

[summary]
sentences = 4

[notion]
token = "secret_abc"
database_id = "db123"
"#;
        let config: Config = toml::from_str(source).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("docs"));
        assert_eq!(
            config.output.processed_dir,
            Some(PathBuf::from("/archive/done"))
        );
        assert_eq!(config.notion.token.as_deref(), Some("secret_abc"));
        assert_eq!(config.notion.database_id.as_deref(), Some("db123"));
    }

    #[test]
    fn test_flag_beats_file_for_sentences() {
        let config: Config = toml::from_str("[summary]\nsentences = 5\n").unwrap();
        assert_eq!(config.sentences(Some(7)), 7);
        assert_eq!(config.sentences(None), 5);
    }

    #[test]
    fn test_sentences_never_below_one() {
        let config = Config::default();
        assert_eq!(config.sentences(Some(0)), 1);
    }

    #[test]
    fn test_processed_dir_defaults_inside_input() {
        let config = Config::default();
        let dir = config.processed_dir(None, Path::new("/mail/inbox"));
        assert_eq!(dir, PathBuf::from("/mail/inbox/processed"));
    }

    #[test]
    fn test_notion_credentials_prefer_flags() {
        let config: Config =
            toml::from_str("[notion]\ntoken = \"file_token\"\ndatabase_id = \"file_db\"\n")
                .unwrap();

        let (token, database_id) = config
            .notion_credentials(Some("flag_token".into()), None)
            .unwrap();

        assert_eq!(token, "flag_token");
        assert_eq!(database_id, "file_db");
    }

    #[test]
    fn test_notion_credentials_missing_token_errors() {
        let config = Config::default();
        let result = config.notion_credentials(None, Some("db".into()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
