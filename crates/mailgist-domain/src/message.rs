//! Email message module - the unit of work for the whole pipeline

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Longest subject stem carried into a generated file name.
const MAX_SUBJECT_STEM: usize = 100;

/// A parsed email message.
///
/// Built exactly once by the loader from a single `.eml` file; identity is
/// the source path. Consumers (summarization pipeline, renderers, publisher)
/// borrow it read-only and never mutate it. A message with empty bodies is
/// still valid and summarizes to nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Path of the `.eml` file this message was parsed from
    pub source_path: PathBuf,

    /// Decoded `Subject:` header, empty when the header is missing
    pub subject: String,

    /// Decoded `From:` header, `Name <addr>` form when both parts exist
    pub sender: String,

    /// `To:` then `Cc:` addresses in header order; duplicates preserved
    pub recipients: Vec<String>,

    /// Parsed `Date:` header carrying its original UTC offset
    pub date: Option<DateTime<FixedOffset>>,

    /// First `text/plain` body part in document order, empty when absent
    pub plain_body: String,

    /// First `text/html` body part in document order, empty when absent
    pub html_body: String,
}

impl EmailMessage {
    /// Create a new message record
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_path: PathBuf,
        subject: String,
        sender: String,
        recipients: Vec<String>,
        date: Option<DateTime<FixedOffset>>,
        plain_body: String,
        html_body: String,
    ) -> Self {
        Self {
            source_path,
            subject,
            sender,
            recipients,
            date,
            plain_body,
            html_body,
        }
    }

    /// Subject reduced to a filesystem-safe file name stem
    ///
    /// Alphanumerics, spaces, hyphens and underscores pass through; every
    /// other character becomes `_`. The result is truncated to 100
    /// characters and trimmed. An empty result yields `"untitled"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailgist_domain::EmailMessage;
    ///
    /// let mut msg = EmailMessage::default();
    /// msg.subject = "Re: Q3 report (final?)".to_string();
    /// assert_eq!(msg.filename_safe_subject(), "Re_ Q3 report _final__");
    /// ```
    pub fn filename_safe_subject(&self) -> String {
        let safe: String = self
            .subject
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .take(MAX_SUBJECT_STEM)
            .collect();
        let safe = safe.trim();
        if safe.is_empty() {
            "untitled".to_string()
        } else {
            safe.to_string()
        }
    }

    /// Date-prefixed stem used to name generated artifacts
    ///
    /// `YYYY-MM-DD_<safe subject>` when the message has a date,
    /// `unknown-date_<safe subject>` otherwise.
    pub fn logical_filename(&self) -> String {
        match &self.date {
            Some(date) => format!("{}_{}", date.format("%Y-%m-%d"), self.filename_safe_subject()),
            None => format!("unknown-date_{}", self.filename_safe_subject()),
        }
    }

    /// Whether the message carries an HTML body part
    pub fn has_html_body(&self) -> bool {
        !self.html_body.trim().is_empty()
    }
}

impl Default for EmailMessage {
    fn default() -> Self {
        Self {
            source_path: PathBuf::new(),
            subject: String::new(),
            sender: String::new(),
            recipients: Vec::new(),
            date: None,
            plain_body: String::new(),
            html_body: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn message_with_subject(subject: &str) -> EmailMessage {
        EmailMessage {
            subject: subject.to_string(),
            ..EmailMessage::default()
        }
    }

    #[test]
    fn test_safe_subject_replaces_punctuation() {
        let msg = message_with_subject("Invoice #42: pay now!");
        assert_eq!(msg.filename_safe_subject(), "Invoice _42_ pay now_");
    }

    #[test]
    fn test_safe_subject_keeps_allowed_chars() {
        let msg = message_with_subject("weekly-status_update 7");
        assert_eq!(msg.filename_safe_subject(), "weekly-status_update 7");
    }

    #[test]
    fn test_safe_subject_truncates_to_100_chars() {
        let msg = message_with_subject(&"a".repeat(250));
        assert_eq!(msg.filename_safe_subject().chars().count(), 100);
    }

    #[test]
    fn test_safe_subject_empty_becomes_untitled() {
        assert_eq!(message_with_subject("").filename_safe_subject(), "untitled");
        // All-punctuation subjects collapse to underscores, not emptiness
        assert_eq!(message_with_subject("???").filename_safe_subject(), "___");
    }

    #[test]
    fn test_safe_subject_whitespace_only_becomes_untitled() {
        assert_eq!(
            message_with_subject("   ").filename_safe_subject(),
            "untitled"
        );
    }

    #[test]
    fn test_logical_filename_with_date() {
        let mut msg = message_with_subject("Team sync");
        msg.date = Some(
            chrono::FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 3, 9, 14, 30, 0)
                .unwrap(),
        );
        assert_eq!(msg.logical_filename(), "2024-03-09_Team sync");
    }

    #[test]
    fn test_logical_filename_without_date() {
        let msg = message_with_subject("Team sync");
        assert_eq!(msg.logical_filename(), "unknown-date_Team sync");
    }

    #[test]
    fn test_has_html_body() {
        let mut msg = EmailMessage::default();
        assert!(!msg.has_html_body());
        msg.html_body = "  \n ".to_string();
        assert!(!msg.has_html_body());
        msg.html_body = "<p>hi</p>".to_string();
        assert!(msg.has_html_body());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: safe subjects only ever contain allowed characters
        #[test]
        fn test_safe_subject_alphabet(subject in ".*") {
            let msg = EmailMessage {
                subject,
                ..EmailMessage::default()
            };
            let safe = msg.filename_safe_subject();

            prop_assert!(safe.chars().all(|c| {
                c.is_alphanumeric() || c == ' ' || c == '-' || c == '_'
            }), "unexpected character in {:?}", safe);
        }

        /// Property: safe subjects are bounded and never empty
        #[test]
        fn test_safe_subject_bounds(subject in ".*") {
            let msg = EmailMessage {
                subject,
                ..EmailMessage::default()
            };
            let safe = msg.filename_safe_subject();

            prop_assert!(!safe.is_empty());
            prop_assert!(safe.chars().count() <= 100);
        }

        /// Property: logical file names always start with a date-like prefix
        #[test]
        fn test_logical_filename_prefix(subject in ".*") {
            let msg = EmailMessage {
                subject,
                ..EmailMessage::default()
            };

            prop_assert!(msg.logical_filename().starts_with("unknown-date_"));
        }
    }
}
