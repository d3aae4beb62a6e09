//! Mailgist Pipeline
//!
//! Glue between a parsed message and its key points.
//!
//! # Overview
//!
//! The pipeline picks the right body (HTML when present, plain otherwise),
//! normalizes it through [`mailgist_extract`], and hands the clean text to
//! [`mailgist_summarizer`]. It never fails for a well-formed message: when
//! the summarizer degrades to its fallback, the pipeline reports a warning
//! through the injected [`Reporter`] and returns the fallback sentences.
//!
//! # Example Usage
//!
//! ```
//! use mailgist_domain::{EmailMessage, NoopReporter};
//! use mailgist_pipeline::summarize_message;
//!
//! let mut message = EmailMessage::default();
//! message.html_body = "<p>Offsite moved to the ninth of May.</p>".to_string();
//!
//! let points = summarize_message(&message, 3, &NoopReporter);
//! assert_eq!(points, vec!["Offsite moved to the ninth of May."]);
//! ```

#![warn(missing_docs)]

use mailgist_domain::{EmailMessage, Reporter};
use tracing::{debug, warn};

/// Produce up to `sentence_count` key points for one message
///
/// The HTML body wins when both bodies are present; a message with neither
/// body yields an empty vector. Degraded summarization is reported through
/// `reporter` and through the log, then the degraded result is returned.
pub fn summarize_message(
    message: &EmailMessage,
    sentence_count: usize,
    reporter: &dyn Reporter,
) -> Vec<String> {
    let source = if message.has_html_body() {
        mailgist_extract::html_to_text(&message.html_body)
    } else {
        mailgist_extract::clean_noise(&message.plain_body)
    };
    debug!(
        "normalized {} chars of body text for {:?}",
        source.len(),
        message.source_path
    );

    let outcome = mailgist_summarizer::summarize_with_outcome(&source, sentence_count);
    if outcome.used_fallback {
        let notice = format!(
            "summarizer fell back to a naive sentence split for '{}'",
            message.subject
        );
        warn!("{notice}");
        reporter.warn(&notice);
    }
    outcome.sentences
}
