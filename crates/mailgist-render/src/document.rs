//! Shared document preparation.
//!
//! Every renderer starts from the same header fields and the same cleaned
//! body text; this module holds the pieces they share so the PDF, RTF and
//! digest outputs stay consistent with each other.

use chrono::{DateTime, FixedOffset};
use mailgist_domain::EmailMessage;

/// Human-facing date format used across all rendered documents.
const DATE_FORMAT_DISPLAY: &str = "%B %d, %Y at %I:%M %p";

/// How many recipients a rendered header shows before eliding the rest.
const HEADER_RECIPIENT_LIMIT: usize = 3;

/// Formats a message date for display, or `"Unknown"` when the message
/// carried no parseable `Date:` header.
pub fn display_date(date: Option<&DateTime<FixedOffset>>) -> String {
    match date {
        Some(date) => date.format(DATE_FORMAT_DISPLAY).to_string(),
        None => "Unknown".to_string(),
    }
}

/// The subject line, with a placeholder for messages that had none.
pub fn subject_or_placeholder(subject: &str) -> String {
    let trimmed = subject.trim();
    if trimmed.is_empty() {
        "(No Subject)".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Joins every recipient into one comma-separated line.
pub fn recipients_line(recipients: &[String]) -> String {
    if recipients.is_empty() {
        return "Unknown".to_string();
    }
    recipients.join(", ")
}

/// Like [`recipients_line`] but shows only the first few names so a header
/// block stays one or two lines tall. The remainder is dropped without a
/// marker.
pub fn elided_recipients(recipients: &[String]) -> String {
    if recipients.is_empty() {
        return "Unknown".to_string();
    }
    recipients
        .iter()
        .take(HEADER_RECIPIENT_LIMIT)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

/// The `From` / `To` / `Date` lines shown under a document title.
pub fn header_fields(message: &EmailMessage) -> Vec<(&'static str, String)> {
    let sender = if message.sender.trim().is_empty() {
        "Unknown".to_string()
    } else {
        message.sender.clone()
    };
    vec![
        ("From", sender),
        ("To", elided_recipients(&message.recipients)),
        ("Date", display_date(message.date.as_ref())),
    ]
}

/// Normalizes text for fixed-layout output.
///
/// The built-in PDF faces only cover a Latin repertoire, so typographic
/// punctuation is folded to its ASCII equivalent and characters the fonts
/// cannot show (astral-plane symbols, the dingbat blocks) are dropped.
pub fn sanitize_for_layout(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}' => {}
            c if (c as u32) > 0xFFFF => {}
            c if ('\u{2600}'..='\u{27BF}').contains(&c) => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_date() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 4, 9, 14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_display_date_formats_known_dates() {
        assert_eq!(display_date(Some(&sample_date())), "April 09, 2024 at 02:30 PM");
    }

    #[test]
    fn test_display_date_missing() {
        assert_eq!(display_date(None), "Unknown");
    }

    #[test]
    fn test_subject_placeholder() {
        assert_eq!(subject_or_placeholder("  "), "(No Subject)");
        assert_eq!(subject_or_placeholder(" Weekly sync "), "Weekly sync");
    }

    #[test]
    fn test_elided_recipients_caps_the_list() {
        let recipients: Vec<String> = (1..=5).map(|n| format!("user{n}@example.com")).collect();
        let line = elided_recipients(&recipients);
        assert_eq!(
            line,
            "user1@example.com, user2@example.com, user3@example.com"
        );
    }

    #[test]
    fn test_elided_recipients_short_list_untouched() {
        let recipients = vec!["a@example.com".to_string(), "b@example.com".to_string()];
        assert_eq!(elided_recipients(&recipients), "a@example.com, b@example.com");
    }

    #[test]
    fn test_recipients_line_empty_is_unknown() {
        assert_eq!(recipients_line(&[]), "Unknown");
    }

    #[test]
    fn test_sanitize_folds_typographic_punctuation() {
        let text = "\u{201C}Don\u{2019}t\u{201D} \u{2013} wait\u{2026}";
        assert_eq!(sanitize_for_layout(text), "\"Don't\" - wait...");
    }

    #[test]
    fn test_sanitize_drops_emoji_and_dingbats() {
        let text = "Done \u{2705} and shipped \u{1F680}!";
        assert_eq!(sanitize_for_layout(text), "Done  and shipped !");
    }

    #[test]
    fn test_sanitize_preserves_plain_ascii() {
        let text = "Plain text, nothing fancy (2024).";
        assert_eq!(sanitize_for_layout(text), text);
    }

    #[test]
    fn test_header_fields_fill_unknowns() {
        let message = EmailMessage::default();
        let fields = header_fields(&message);
        assert_eq!(fields[0], ("From", "Unknown".to_string()));
        assert_eq!(fields[1], ("To", "Unknown".to_string()));
        assert_eq!(fields[2], ("Date", "Unknown".to_string()));
    }
}
