//! HTML body filtering and text conversion
//!
//! HTML email is filtered at the DOM level first (scripts, styles, hidden
//! elements, tracking anchors), then rendered to text with link URLs and
//! images suppressed. Two strengths exist: [`html_to_text`] feeds the
//! summarizer and chains into the full noise rules, [`document_text`] keeps
//! readable prose for the PDF and RTF renderers.

use std::io::Cursor;
use std::sync::LazyLock;

use html2text::render::TrivialDecorator;
use regex::Regex;
use scraper::{Html, Selector};

use crate::noise::clean_noise;

/// Render width passed to the text converter. Wide enough that real email
/// paragraphs never wrap, so line breaks in the output correspond to
/// structure in the source rather than layout.
const NO_WRAP_WIDTH: usize = 100_000;

static STRIPPED_TAGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script, style, img, noscript").unwrap());

static STYLED_ELEMENTS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[style]").unwrap());

static ANCHORS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

static DISPLAY_NONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").unwrap());

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Drop elements that never carry body signal, then serialize what is left.
///
/// Removed: `script`, `style`, `img`, `noscript`; anything styled
/// `display:none`; anchors whose visible text is shorter than two
/// characters (tracking pixels and icon links).
fn filter_dom(html: &str, drop_hidden_and_short_anchors: bool) -> String {
    let mut doc = Html::parse_document(html);

    let mut doomed = Vec::new();
    for element in doc.select(&STRIPPED_TAGS) {
        doomed.push(element.id());
    }
    if drop_hidden_and_short_anchors {
        for element in doc.select(&STYLED_ELEMENTS) {
            let hidden = element
                .value()
                .attr("style")
                .is_some_and(|style| DISPLAY_NONE.is_match(style));
            if hidden {
                doomed.push(element.id());
            }
        }
        for element in doc.select(&ANCHORS) {
            let visible: String = element.text().collect();
            if visible.trim().chars().count() < 2 {
                doomed.push(element.id());
            }
        }
    }
    for id in doomed {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }

    doc.root_element().html()
}

/// Render filtered HTML to text, suppressing link URLs.
///
/// The trivial decorator emits visible text only: link labels pass through
/// bare, and literal brackets in a message body are left alone. A document
/// the converter cannot handle degrades to tag-stripped source text.
fn render_text(filtered_html: &str) -> String {
    html2text::from_read_with_decorator(
        Cursor::new(filtered_html.as_bytes()),
        NO_WRAP_WIDTH,
        TrivialDecorator::new(),
    )
    .unwrap_or_else(|_| TAG.replace_all(filtered_html, " ").into_owned())
}

/// Convert an HTML body into summarizer-ready text
///
/// DOM filtering, text conversion, then the full noise-rule sequence from
/// [`crate::noise`]. The result contains no markup, no URLs, and no
/// tracking artifacts.
///
/// # Examples
///
/// ```
/// use mailgist_extract::html_to_text;
///
/// let html = "<html><body>\
///     <p>The migration finished ahead of schedule.</p>\
///     <img src=\"https://mail.example.com/pixel.png\">\
///     </body></html>";
/// assert_eq!(html_to_text(html), "The migration finished ahead of schedule.");
/// ```
pub fn html_to_text(html: &str) -> String {
    let filtered = filter_dom(html, true);
    clean_noise(&render_text(&filtered))
}

/// Produce the readable text used by the file renderers
///
/// Prefers the HTML body when present: scripts, styles and images are
/// dropped, link labels are kept, and blank-line runs are squeezed, but
/// prose is otherwise left alone so the rendered document reads like the
/// original message. Plain bodies pass through trimmed.
pub fn document_text(plain_body: &str, html_body: &str) -> String {
    if html_body.trim().is_empty() {
        return plain_body.trim().to_string();
    }
    let filtered = filter_dom(html_body, false);
    let rendered = render_text(&filtered);
    BLANK_RUN.replace_all(&rendered, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_style_img_noscript_removed() {
        let html = "<html><body>\
            <p>Budget approval is moving to the next board meeting.</p>\
            <script>var tracker = 1;</script>\
            <style>p { color: red; }</style>\
            <img src=\"https://cdn.example.com/logo.png\" alt=\"logo\">\
            <noscript>Please enable JavaScript to continue.</noscript>\
            </body></html>";
        let text = html_to_text(html);
        assert!(text.contains("Budget approval is moving to the next board meeting."));
        assert!(!text.contains("tracker"));
        assert!(!text.contains("color"));
        assert!(!text.contains("JavaScript"));
    }

    #[test]
    fn test_display_none_elements_removed() {
        let html = "<html><body>\
            <p>The visible part of this message survives cleaning.</p>\
            <div style=\"DISPLAY : none\">Preview text stuffing that nobody should read.</div>\
            </body></html>";
        let text = html_to_text(html);
        assert!(text.contains("The visible part of this message survives cleaning."));
        assert!(!text.contains("Preview text stuffing"));
    }

    #[test]
    fn test_short_anchor_removed_long_anchor_text_kept() {
        let html = "<html><body>\
            <p>Release notes for version twelve are available now.</p>\
            <p><a href=\"https://t.example/o/1\">.</a></p>\
            <p><a href=\"https://blog.example.com/12\">Read the full release notes</a></p>\
            </body></html>";
        let text = html_to_text(html);
        assert!(text.contains("Read the full release notes"));
        assert!(!text.contains("https://"));
        assert!(!text.contains("t.example"));
    }

    #[test]
    fn test_link_urls_suppressed() {
        let html = "<html><body>\
            <p>Please review <a href=\"https://docs.example.com/q3\">the quarterly document</a> \
            before Thursday standup.</p>\
            </body></html>";
        let text = html_to_text(html);
        assert!(text.contains("the quarterly document"));
        assert!(!text.contains("docs.example.com"));
        assert!(!text.contains('['));
    }

    #[test]
    fn test_literal_bracket_references_kept() {
        let html = "<html><body>\
            <p>Ticket [backlog][12] moved to the sprint board yesterday.</p>\
            </body></html>";
        let text = html_to_text(html);
        assert!(text.contains("[backlog][12]"));
    }

    #[test]
    fn test_long_paragraph_not_wrapped() {
        let sentence = "This paragraph keeps going with more and more words so that any \
                        width-based wrapping in the converter would have to split it. "
            .repeat(20);
        let html = format!("<html><body><p>{sentence}</p></body></html>");
        let text = html_to_text(&html);
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_empty_and_bodyless_html() {
        assert_eq!(html_to_text(""), "");
        assert_eq!(html_to_text("<html><body></body></html>"), "");
    }

    #[test]
    fn test_document_text_prefers_html_and_keeps_link_labels() {
        let html = "<html><body>\
            <p>Dinner is at seven on Saturday.</p>\
            <p><a href=\"https://maps.example.com/yx\">Directions to the venue</a></p>\
            <script>nope();</script>\
            </body></html>";
        let text = document_text("plain fallback", html);
        assert!(text.contains("Dinner is at seven on Saturday."));
        assert!(text.contains("Directions to the venue"));
        assert!(!text.contains("maps.example.com"));
        assert!(!text.contains("nope"));
    }

    #[test]
    fn test_document_text_plain_passthrough() {
        let text = document_text("  Short note.\nSecond line.  ", "");
        assert_eq!(text, "Short note.\nSecond line.");
    }

    #[test]
    fn test_document_text_keeps_reference_definition_lines() {
        let html = "<html><body><p>[1]: build/logs/run-42.txt</p></body></html>";
        let text = document_text("", html);
        assert_eq!(text, "[1]: build/logs/run-42.txt");
    }

    #[test]
    fn test_document_text_squeezes_blank_runs() {
        let html = "<html><body><p>One.</p><br><br><br><br><p>Two.</p></body></html>";
        let text = document_text("", html);
        assert!(!text.contains("\n\n\n"));
        assert!(text.contains("One."));
        assert!(text.contains("Two."));
    }
}
