//! RTF rendering.
//!
//! The output is assembled by hand: the format needed here is a flat
//! sequence of escaped paragraphs, which keeps the writer small and the
//! files readable in any word processor.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use mailgist_domain::EmailMessage;
use mailgist_extract::document_text;
use tracing::{info, warn};

use crate::document::{header_fields, subject_or_placeholder};
use crate::error::RenderError;
use crate::paths::deduplicate_path;

/// Renders one message to an RTF file at `path`.
pub fn write_rtf(message: &EmailMessage, path: &Path) -> Result<(), RenderError> {
    fs::write(path, rtf_document(message))?;
    Ok(())
}

/// Renders every message into `out_dir`, one RTF per message.
///
/// File names come from [`EmailMessage::filename_safe_subject`] with `_1`,
/// `_2` suffixes on collisions. Failures are logged and skipped.
pub fn render_rtfs(messages: &[EmailMessage], out_dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
    fs::create_dir_all(out_dir)?;
    let mut used_names = HashSet::new();
    let mut written = Vec::new();
    for message in messages {
        let target = out_dir.join(format!("{}.rtf", message.filename_safe_subject()));
        let target = deduplicate_path(&target, &mut used_names);
        match write_rtf(message, &target) {
            Ok(()) => {
                info!("wrote {}", target.display());
                written.push(target);
            }
            Err(error) => {
                warn!(
                    "RTF generation failed for {}: {error}",
                    message.source_path.display()
                );
            }
        }
    }
    Ok(written)
}

/// Builds the complete RTF document for a message.
fn rtf_document(message: &EmailMessage) -> String {
    let title = subject_or_placeholder(&message.subject);
    let body = document_text(&message.plain_body, &message.html_body);

    let mut rtf = String::with_capacity(body.len() + 512);
    rtf.push_str("{\\rtf1\\ansi\\deff0{\\fonttbl{\\f0 Helvetica;}}\\f0\\fs22\n");
    rtf.push_str("{\\fs36\\b ");
    rtf.push_str(&escape_rtf(&title));
    rtf.push_str("}\\par\\par\n");
    for (label, value) in header_fields(message) {
        rtf.push_str("{\\b ");
        rtf.push_str(label);
        rtf.push_str(": }");
        rtf.push_str(&escape_rtf(&value));
        rtf.push_str("\\par\n");
    }
    rtf.push_str("\\par\n");
    rtf.push_str(&escape_rtf(&body));
    rtf.push_str("\\par\n}\n");
    rtf
}

/// Escapes text for inclusion in an RTF document.
///
/// Backslashes and braces are control characters, newlines become paragraph
/// breaks, and anything outside ASCII is emitted as a signed 16-bit `\uN?`
/// escape. Characters beyond the Basic Multilingual Plane have no such
/// escape and are dropped.
pub fn escape_rtf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\par\n"),
            '\r' => {}
            c if c.is_ascii() => out.push(c),
            c => {
                let code = c as u32;
                if code <= 0xFFFF {
                    let mut signed = code as i32;
                    if signed > 32767 {
                        signed -= 65536;
                    }
                    out.push_str(&format!("\\u{signed}?"));
                }
            }
        }
    }
    out
}
