//! Integration tests for `.eml` loading against real files on disk

use std::fs;
use std::path::Path;

use mailgist_loader::{is_valid_eml_file, parse_eml_file, scan_directory, LoaderError};
use tempfile::TempDir;

const PLAIN_EML: &str = "From: Alice Example <alice@example.com>\r\n\
To: Bob Example <bob@example.com>\r\n\
Cc: carol@example.com, Bob Example <bob@example.com>\r\n\
Subject: Team sync\r\n\
Date: Tue, 9 Apr 2024 14:30:00 +0200\r\n\
MIME-Version: 1.0\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Agenda attached.\r\n";

const MULTIPART_EML: &str = "From: Alice Example <alice@example.com>\r\n\
To: bob@example.com\r\n\
Subject: Numbers\r\n\
Date: Tue, 9 Apr 2024 14:30:00 +0200\r\n\
MIME-Version: 1.0\r\n\
Content-Type: multipart/alternative; boundary=\"BOUNDARY\"\r\n\
\r\n\
--BOUNDARY\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Plain version here.\r\n\
--BOUNDARY\r\n\
Content-Type: text/html; charset=utf-8\r\n\
\r\n\
<html><body><p>HTML version here.</p></body></html>\r\n\
--BOUNDARY--\r\n";

const HTML_ONLY_EML: &str = "From: news@example.com\r\n\
To: bob@example.com\r\n\
Subject: Weekly news\r\n\
MIME-Version: 1.0\r\n\
Content-Type: text/html; charset=utf-8\r\n\
\r\n\
<html><body><p>All the news that fits.</p></body></html>\r\n";

const ENCODED_SUBJECT_EML: &str = "From: alice@example.com\r\n\
To: bob@example.com\r\n\
Subject: =?utf-8?q?Caf=C3=A9_plans?=\r\n\
MIME-Version: 1.0\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Meet at nine.\r\n";

fn write_eml(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_parse_plain_message() {
    let dir = TempDir::new().unwrap();
    let path = write_eml(dir.path(), "sync.eml", PLAIN_EML);

    let message = parse_eml_file(&path).unwrap();
    assert_eq!(message.subject, "Team sync");
    assert_eq!(message.sender, "Alice Example <alice@example.com>");
    assert_eq!(
        message.recipients,
        vec![
            "Bob Example <bob@example.com>",
            "carol@example.com",
            "Bob Example <bob@example.com>",
        ]
    );
    assert_eq!(message.plain_body.trim(), "Agenda attached.");
    assert!(message.html_body.is_empty());
    assert_eq!(message.source_path, path);

    let date = message.date.expect("date header should parse");
    assert_eq!(date.offset().local_minus_utc(), 7200);
    assert_eq!(date.format("%Y-%m-%d").to_string(), "2024-04-09");
}

#[test]
fn test_recipient_order_and_duplicates_preserved() {
    let dir = TempDir::new().unwrap();
    let path = write_eml(dir.path(), "sync.eml", PLAIN_EML);

    let message = parse_eml_file(&path).unwrap();
    // To before Cc, duplicates intact
    assert_eq!(message.recipients.len(), 3);
    assert_eq!(message.recipients[0], "Bob Example <bob@example.com>");
    assert_eq!(message.recipients[2], "Bob Example <bob@example.com>");
}

#[test]
fn test_parse_multipart_fills_both_bodies() {
    let dir = TempDir::new().unwrap();
    let path = write_eml(dir.path(), "numbers.eml", MULTIPART_EML);

    let message = parse_eml_file(&path).unwrap();
    assert_eq!(message.plain_body.trim(), "Plain version here.");
    assert!(message.html_body.contains("HTML version here."));
}

#[test]
fn test_parse_html_only_message() {
    let dir = TempDir::new().unwrap();
    let path = write_eml(dir.path(), "news.eml", HTML_ONLY_EML);

    let message = parse_eml_file(&path).unwrap();
    assert!(message.plain_body.is_empty());
    assert!(message.html_body.contains("All the news that fits."));
    assert!(message.date.is_none());
}

#[test]
fn test_encoded_subject_is_decoded() {
    let dir = TempDir::new().unwrap();
    let path = write_eml(dir.path(), "cafe.eml", ENCODED_SUBJECT_EML);

    let message = parse_eml_file(&path).unwrap();
    assert_eq!(message.subject, "Café plans");
}

#[test]
fn test_non_email_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_eml(dir.path(), "notes.eml", "shopping list\nmilk\neggs\n");

    assert!(!is_valid_eml_file(&path).unwrap());
    match parse_eml_file(&path) {
        Err(LoaderError::NotAnEmail(_)) => {}
        other => panic!("expected NotAnEmail, got {other:?}"),
    }
}

#[test]
fn test_scan_directory_sorts_skips_and_continues() {
    let dir = TempDir::new().unwrap();
    write_eml(dir.path(), "b_second.eml", PLAIN_EML);
    write_eml(dir.path(), "a_first.eml", MULTIPART_EML);
    write_eml(dir.path(), "broken.eml", "not mail at all\n");
    write_eml(dir.path(), "ignored.txt", PLAIN_EML);

    let messages = scan_directory(dir.path()).unwrap();
    assert_eq!(messages.len(), 2);
    // Lexicographic filename order, not discovery order
    assert_eq!(messages[0].subject, "Numbers");
    assert_eq!(messages[1].subject, "Team sync");
}

#[cfg(unix)]
#[test]
fn test_scan_directory_skips_symlinks() {
    let dir = TempDir::new().unwrap();
    let real = write_eml(dir.path(), "real.eml", PLAIN_EML);
    std::os::unix::fs::symlink(&real, dir.path().join("link.eml")).unwrap();

    let messages = scan_directory(dir.path()).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].source_path, real);
}

#[test]
fn test_scan_missing_directory_errors() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        scan_directory(&missing),
        Err(LoaderError::Io(_))
    ));
}
