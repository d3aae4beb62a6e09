//! End-to-end tests for the process command, run against a real temp
//! directory without any Notion involvement.

use std::fs;
use std::path::PathBuf;

use mailgist_cli::commands::execute_process;
use mailgist_cli::{cli::ProcessArgs, Config, Formatter};

const SAMPLE_EML: &str = "From: Alice Example <alice@example.com>\r\n\
To: bob@example.com\r\n\
Subject: Quarterly planning\r\n\
Date: Tue, 9 Apr 2024 14:30:00 +0200\r\n\
MIME-Version: 1.0\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
The planning meeting moved to Thursday afternoon. Finance wants the revised \
budget before the end of the month. Facilities booked the large conference \
room for the whole day. Please bring the updated hiring plan to the session.\r\n";

fn process_args(input: PathBuf, output: PathBuf) -> ProcessArgs {
    ProcessArgs {
        input_dir: Some(input),
        output_dir: Some(output),
        sentences: Some(2),
        processed_dir: None,
        skip_pdf: false,
        notion: false,
        keep: false,
        notion_token: None,
        notion_database_id: None,
    }
}

#[tokio::test]
async fn test_process_renders_documents_and_archives_sources() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("inbox");
    let output = dir.path().join("out");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("planning.eml"), SAMPLE_EML).unwrap();

    let args = process_args(input.clone(), output.clone());
    execute_process(args, &Config::default(), &Formatter::new(false))
        .await
        .unwrap();

    let pdf = output.join("pdfs").join("2024-04-09_Quarterly planning.pdf");
    assert!(pdf.exists());
    assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));

    let rtf = output.join("rtfs").join("Quarterly planning.rtf");
    assert!(rtf.exists());

    let digest = fs::read_to_string(output.join("email_summary.html")).unwrap();
    assert!(digest.contains("Quarterly planning"));

    // Source file moved into the default processed directory
    assert!(!input.join("planning.eml").exists());
    assert!(input.join("processed").join("planning.eml").exists());
}

#[tokio::test]
async fn test_process_keep_leaves_sources_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("inbox");
    let output = dir.path().join("out");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("planning.eml"), SAMPLE_EML).unwrap();

    let mut args = process_args(input.clone(), output.clone());
    args.keep = true;
    args.skip_pdf = true;
    execute_process(args, &Config::default(), &Formatter::new(false))
        .await
        .unwrap();

    assert!(input.join("planning.eml").exists());
    assert!(!input.join("processed").exists());
    assert!(!output.join("pdfs").exists());
    assert!(output.join("email_summary.html").exists());
}

#[tokio::test]
async fn test_process_empty_directory_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("inbox");
    let output = dir.path().join("out");
    fs::create_dir_all(&input).unwrap();

    let args = process_args(input, output.clone());
    execute_process(args, &Config::default(), &Formatter::new(false))
        .await
        .unwrap();

    assert!(!output.exists());
}
