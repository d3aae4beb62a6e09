//! Ordered noise-stripping rules for email body text
//!
//! Each rule is a pure function over a string; [`clean_noise`] composes them
//! in a fixed order. The order matters: tracking links must go before the
//! generic markdown-link flattening, and the line filter runs last so it
//! sees the damage the earlier rules left behind.

use std::sync::LazyLock;

use regex::Regex;

/// Zero-width and invisible characters commonly injected by mail clients
/// and tracking tooling (ZWSP, ZWNJ, ZWJ, word joiner, BOM, soft hyphen).
static INVISIBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{200B}\x{200C}\x{200D}\x{2060}\x{FEFF}\x{AD}]+").unwrap());

/// Markdown-style links whose URL points at click/track/pixel endpoints.
static TRACKING_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\[[^\]]*\]\(https?://[^)]*(?:click|track|open|pixel|emails/click|unsubscribe)[^)]*\)",
    )
    .unwrap()
});

/// Any remaining markdown-style link; the label survives, the URL goes.
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]+\)").unwrap());

/// Layout spacer runs: repeated non-breaking-space padding or very long
/// whitespace stretches used to fake table layout in text.
static SPACER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s*\x{A0}\s*){3,}|\s{10,}").unwrap());

/// Long unbroken base64-alphabet runs (inline images, tracking payloads).
static BASE64_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z0-9+/=]{50,}").unwrap());

/// A line has to contain at least one three-letter word to be worth keeping.
static LETTER_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z]{3,}").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Remove invisible characters (rule 1)
pub fn strip_invisible(text: &str) -> String {
    INVISIBLE.replace_all(text, "").into_owned()
}

/// Remove tracking links entirely, label included (rule 2)
pub fn strip_tracking_links(text: &str) -> String {
    TRACKING_LINK.replace_all(text, "").into_owned()
}

/// Collapse remaining `[label](url)` links to their label (rule 3)
pub fn flatten_markdown_links(text: &str) -> String {
    MARKDOWN_LINK.replace_all(text, "$1").into_owned()
}

/// Collapse spacer runs to a single space (rule 4)
pub fn collapse_spacers(text: &str) -> String {
    SPACER_RUN.replace_all(text, " ").into_owned()
}

/// Remove base64-looking runs of 50 or more characters (rule 5)
pub fn strip_base64_runs(text: &str) -> String {
    BASE64_RUN.replace_all(text, "").into_owned()
}

/// Keep only lines that still look like prose (rule 6)
///
/// A line survives when, after trimming, it is longer than 10 characters and
/// contains a run of at least 3 ASCII letters. Surviving lines get their
/// internal whitespace collapsed to single spaces.
pub fn keep_content_lines(text: &str) -> String {
    let mut kept = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.chars().count() > 10 && LETTER_RUN.is_match(trimmed) {
            kept.push(WHITESPACE_RUN.replace_all(trimmed, " ").into_owned());
        }
    }
    kept.join("\n")
}

/// Run the full rule sequence over a body text
///
/// This is the aggressive cleaning used ahead of summarization. The output
/// contains none of the stripped patterns, and running it twice returns the
/// same text as running it once.
///
/// # Examples
///
/// ```
/// use mailgist_extract::clean_noise;
///
/// let noisy = "The deadline moved to Friday afternoon.\n\
///              [View in browser](https://mail.example.com/track/abc123)\n\
///              ---\n";
/// assert_eq!(clean_noise(noisy), "The deadline moved to Friday afternoon.");
/// ```
pub fn clean_noise(text: &str) -> String {
    let text = strip_invisible(text);
    let text = strip_tracking_links(&text);
    let text = flatten_markdown_links(&text);
    let text = collapse_spacers(&text);
    let text = strip_base64_runs(&text);
    keep_content_lines(&text)
}
