//! The HTML digest: one page linking every processed message, newest first.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use html_escape::{encode_double_quoted_attribute, encode_text};
use mailgist_domain::EmailMessage;
use tracing::info;

use crate::document::{display_date, recipients_line, subject_or_placeholder};
use crate::error::RenderError;
use crate::paths::file_url;

/// One message's slot in the digest.
pub struct DigestEntry<'a> {
    /// The message this entry describes.
    pub message: &'a EmailMessage,
    /// Key points extracted from the message body.
    pub key_points: Vec<String>,
    /// Where the message's PDF was written, if one was produced.
    pub pdf_path: Option<PathBuf>,
}

/// Writes the digest page for `entries` to `path`.
pub fn write_report(entries: &[DigestEntry<'_>], path: &Path) -> Result<(), RenderError> {
    fs::write(path, render_report(entries))?;
    info!("wrote digest with {} entries to {}", entries.len(), path.display());
    Ok(())
}

/// Builds the digest page.
///
/// Entries are ordered by message date, newest first; messages without a
/// parseable date sort to the end.
pub fn render_report(entries: &[DigestEntry<'_>]) -> String {
    let mut ordered: Vec<&DigestEntry<'_>> = entries.iter().collect();
    ordered.sort_by_key(|entry| std::cmp::Reverse(entry.message.date));

    let mut html = String::with_capacity(entries.len() * 512 + 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Email Summary</title>\n<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Email Summary</h1>\n");
    html.push_str(&format!(
        "<p class=\"generated\">Generated {} &middot; {} message{}</p>\n",
        Local::now().format("%Y-%m-%d %H:%M"),
        ordered.len(),
        if ordered.len() == 1 { "" } else { "s" }
    ));

    for entry in ordered {
        push_entry(&mut html, entry);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_entry(html: &mut String, entry: &DigestEntry<'_>) {
    let message = entry.message;
    html.push_str("<div class=\"email\">\n");
    html.push_str(&format!(
        "<h2>{}</h2>\n",
        encode_text(&subject_or_placeholder(&message.subject))
    ));
    html.push_str(&format!(
        "<div class=\"meta\">From: {}<br>To: {}<br>Date: {}</div>\n",
        encode_text(&message.sender),
        encode_text(&recipients_line(&message.recipients)),
        encode_text(&display_date(message.date.as_ref()))
    ));

    if entry.key_points.is_empty() {
        html.push_str("<p class=\"empty\">No key points extracted.</p>\n");
    } else {
        html.push_str("<ul class=\"key-points\">\n");
        for point in &entry.key_points {
            html.push_str(&format!("<li>{}</li>\n", encode_text(point)));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<p class=\"links\">");
    html.push_str(&format!(
        "<a href=\"{}\">Original email</a>",
        encode_double_quoted_attribute(&file_url(&message.source_path))
    ));
    if let Some(pdf) = &entry.pdf_path {
        html.push_str(&format!(
            " <a href=\"{}\">PDF</a>",
            encode_double_quoted_attribute(&file_url(pdf))
        ));
    }
    html.push_str("</p>\n</div>\n");
}

const STYLE: &str = "\
body { font-family: Arial, Helvetica, sans-serif; margin: 2em auto; max-width: 52em; color: #222; }
h1 { border-bottom: 2px solid #444; padding-bottom: 0.2em; }
.generated { color: #777; font-size: 0.85em; }
.email { border: 1px solid #ddd; border-radius: 6px; padding: 1em 1.5em; margin-bottom: 1.5em; }
.email h2 { margin: 0 0 0.3em; font-size: 1.2em; }
.meta { color: #555; font-size: 0.9em; margin-bottom: 0.8em; }
.key-points { margin: 0.5em 0; padding-left: 1.4em; }
.key-points li { margin-bottom: 0.3em; }
.empty { color: #999; font-style: italic; }
.links a { margin-right: 1em; font-size: 0.9em; }
";
