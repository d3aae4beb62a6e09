//! Single-file `.eml` validation and parsing

use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate};
use mail_parser::{Addr, Address, DateTime as MailDateTime, Message, MessageParser, PartType};
use mailgist_domain::EmailMessage;

use crate::error::LoaderError;

/// How much of the file the validity probe reads.
const HEADER_PROBE_BYTES: usize = 4096;

/// Header names that mark a file as email; two or more must appear in the
/// probe window.
const HEADER_INDICATORS: [&str; 7] = [
    "from:",
    "to:",
    "subject:",
    "date:",
    "mime-version:",
    "content-type:",
    "received:",
];

const MIN_HEADER_INDICATORS: usize = 2;

/// Cheap validity probe: does this file look like an email at all?
///
/// Reads the first 4 KiB and counts case-insensitive header indicators.
/// Renamed attachments and stray text files fail this without going through
/// the full MIME parser.
pub fn is_valid_eml_file(path: &Path) -> Result<bool, LoaderError> {
    let file = fs::File::open(path)?;
    let mut probe = Vec::with_capacity(HEADER_PROBE_BYTES);
    file.take(HEADER_PROBE_BYTES as u64).read_to_end(&mut probe)?;
    Ok(looks_like_email(&probe))
}

fn looks_like_email(raw: &[u8]) -> bool {
    let window = &raw[..raw.len().min(HEADER_PROBE_BYTES)];
    let window = String::from_utf8_lossy(window).to_lowercase();
    let hits = HEADER_INDICATORS
        .iter()
        .filter(|needle| window.contains(**needle))
        .count();
    hits >= MIN_HEADER_INDICATORS
}

/// Parse one `.eml` file into a message record
///
/// # Errors
///
/// Returns [`LoaderError::Io`] when the file cannot be read,
/// [`LoaderError::NotAnEmail`] when the validity probe fails, and
/// [`LoaderError::Unparseable`] when the MIME parser rejects the contents.
pub fn parse_eml_file(path: &Path) -> Result<EmailMessage, LoaderError> {
    let raw = fs::read(path)?;
    if !looks_like_email(&raw) {
        return Err(LoaderError::NotAnEmail(path.display().to_string()));
    }
    let message = MessageParser::default()
        .parse(&raw)
        .ok_or_else(|| LoaderError::Unparseable(path.display().to_string()))?;

    Ok(EmailMessage::new(
        path.to_path_buf(),
        message.subject().unwrap_or_default().to_string(),
        message
            .from()
            .map(|address| flatten_address(address).join(", "))
            .unwrap_or_default(),
        collect_recipients(&message),
        message.date().and_then(convert_date),
        first_text_part(&message),
        first_html_part(&message),
    ))
}

/// `To:` first, then `Cc:`, both in header order. Duplicates are kept; the
/// record mirrors what the headers say.
fn collect_recipients(message: &Message) -> Vec<String> {
    let mut recipients = Vec::new();
    if let Some(to) = message.to() {
        recipients.extend(flatten_address(to));
    }
    if let Some(cc) = message.cc() {
        recipients.extend(flatten_address(cc));
    }
    recipients
}

fn flatten_address(address: &Address) -> Vec<String> {
    match address {
        Address::List(addrs) => addrs
            .iter()
            .map(format_addr)
            .filter(|formatted| !formatted.is_empty())
            .collect(),
        Address::Group(groups) => groups
            .iter()
            .flat_map(|group| group.addresses.iter().map(format_addr))
            .filter(|formatted| !formatted.is_empty())
            .collect(),
    }
}

fn format_addr(addr: &Addr) -> String {
    match (addr.name.as_deref(), addr.address.as_deref()) {
        (Some(name), Some(address)) => format!("{name} <{address}>"),
        (Some(name), None) => name.to_string(),
        (None, Some(address)) => address.to_string(),
        (None, None) => String::new(),
    }
}

/// Carry the header's UTC offset over into chrono. Out-of-range components
/// map to `None` rather than a panic.
fn convert_date(date: &MailDateTime) -> Option<DateTime<FixedOffset>> {
    let offset_seconds = (i32::from(date.tz_hour) * 3600 + i32::from(date.tz_minute) * 60)
        * if date.tz_before_gmt { -1 } else { 1 };
    let offset = FixedOffset::east_opt(offset_seconds)?;
    let day = NaiveDate::from_ymd_opt(
        i32::from(date.year),
        u32::from(date.month),
        u32::from(date.day),
    )?;
    let moment = day.and_hms_opt(
        u32::from(date.hour),
        u32::from(date.minute),
        u32::from(date.second),
    )?;
    moment.and_local_timezone(offset).single()
}

/// First `text/plain` part in document order, empty when there is none.
fn first_text_part(message: &Message) -> String {
    for &part_id in &message.text_body {
        if let Some(part) = message.parts.get(part_id) {
            if let PartType::Text(text) = &part.body {
                return text.to_string();
            }
        }
    }
    String::new()
}

/// First `text/html` part in document order, empty when there is none.
fn first_html_part(message: &Message) -> String {
    for &part_id in &message.html_body {
        if let Some(part) = message.parts.get(part_id) {
            if let PartType::Html(html) = &part.body {
                return html.to_string();
            }
        }
    }
    String::new()
}
