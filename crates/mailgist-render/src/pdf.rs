//! PDF rendering with the PDF built-in Helvetica faces.
//!
//! Pages are US letter with one-inch margins. Text is wrapped with a greedy
//! estimate based on the average Helvetica glyph width; exact metrics do not
//! matter because nothing else is positioned relative to the line ends.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use mailgist_domain::EmailMessage;
use mailgist_extract::document_text;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use tracing::{info, warn};

use crate::document::{header_fields, sanitize_for_layout, subject_or_placeholder};
use crate::error::RenderError;
use crate::paths::deduplicate_path;

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 25.4;

const TITLE_SIZE_PT: f32 = 18.0;
const BODY_SIZE_PT: f32 = 11.0;
const LINE_SPACING: f32 = 1.4;

/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

const PT_PER_MM: f32 = 2.834_646;

/// Renders one message to a PDF file at `path`.
pub fn write_pdf(message: &EmailMessage, path: &Path) -> Result<(), RenderError> {
    let title = subject_or_placeholder(&message.subject);
    let (doc, page, layer) =
        PdfDocument::new(&title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let first_layer = doc.get_page(page).get_layer(layer);
    let mut writer = PageWriter {
        doc,
        layer: first_layer,
        cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    for line in wrap_line(&sanitize_for_layout(&title), chars_per_line(TITLE_SIZE_PT)) {
        writer.line(&line, &bold, TITLE_SIZE_PT);
    }
    writer.line("", &regular, BODY_SIZE_PT);

    for (label, value) in header_fields(message) {
        let text = sanitize_for_layout(&format!("{label}: {value}"));
        for line in wrap_line(&text, chars_per_line(BODY_SIZE_PT)) {
            writer.line(&line, &regular, BODY_SIZE_PT);
        }
    }
    writer.line("", &regular, BODY_SIZE_PT);

    let body = document_text(&message.plain_body, &message.html_body);
    for raw_line in body.lines() {
        let clean = sanitize_for_layout(raw_line);
        if clean.trim().is_empty() {
            writer.line("", &regular, BODY_SIZE_PT);
            continue;
        }
        for line in wrap_line(&clean, chars_per_line(BODY_SIZE_PT)) {
            writer.line(&line, &regular, BODY_SIZE_PT);
        }
    }

    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    writer.doc.save(&mut out).map_err(pdf_error)?;
    Ok(())
}

/// Renders every message into `out_dir`, one PDF per message.
///
/// File names come from [`EmailMessage::logical_filename`] with `_1`, `_2`
/// suffixes on collisions. A message whose PDF fails is logged and skipped;
/// the returned vector is aligned with `messages` and holds the written path
/// for each success.
pub fn render_pdfs(
    messages: &[EmailMessage],
    out_dir: &Path,
) -> Result<Vec<Option<PathBuf>>, RenderError> {
    fs::create_dir_all(out_dir)?;
    let mut used_names = HashSet::new();
    let mut written = Vec::with_capacity(messages.len());
    for message in messages {
        let target = out_dir.join(format!("{}.pdf", message.logical_filename()));
        let target = deduplicate_path(&target, &mut used_names);
        match write_pdf(message, &target) {
            Ok(()) => {
                info!("wrote {}", target.display());
                written.push(Some(target));
            }
            Err(error) => {
                warn!(
                    "PDF generation failed for {}: {error}",
                    message.source_path.display()
                );
                written.push(None);
            }
        }
    }
    Ok(written)
}

struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    cursor_mm: f32,
}

impl PageWriter {
    /// Advances the cursor by one line and draws `text` at the new position,
    /// starting a fresh page when the bottom margin would be crossed.
    fn line(&mut self, text: &str, font: &IndirectFontRef, size_pt: f32) {
        let line_mm = size_pt * LINE_SPACING / PT_PER_MM;
        if self.cursor_mm - line_mm < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        self.cursor_mm -= line_mm;
        if !text.is_empty() {
            self.layer
                .use_text(text, size_pt, Mm(MARGIN_MM), Mm(self.cursor_mm), font);
        }
    }
}

fn pdf_error(error: impl std::fmt::Display) -> RenderError {
    RenderError::Pdf(error.to_string())
}

/// How many characters fit on one line at the given font size.
fn chars_per_line(size_pt: f32) -> usize {
    let usable_pt = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) * PT_PER_MM;
    let per_char_pt = size_pt * GLYPH_WIDTH_RATIO;
    ((usable_pt / per_char_pt) as usize).max(1)
}

/// Greedy word wrap. Words longer than a full line are split mid-word.
fn wrap_line(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }
        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if word_len <= max_chars {
            current.push_str(word);
            current_len = word_len;
        } else {
            let mut chunks = hard_split(word, max_chars);
            if let Some(last) = chunks.pop() {
                lines.extend(chunks);
                current_len = last.chars().count();
                current = last;
            }
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

fn hard_split(word: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
