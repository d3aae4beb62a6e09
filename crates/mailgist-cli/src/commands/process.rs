//! The process command: scan, summarize, render, publish, archive.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use mailgist_domain::EmailMessage;
use mailgist_loader::scan_directory;
use mailgist_notion::{export_messages, ExportItem, NotionClient};
use mailgist_pipeline::summarize_message;
use mailgist_render::{
    deduplicate_path, file_url, render_pdfs, render_rtfs, write_report, DigestEntry,
};
use tracing::info;

use crate::cli::ProcessArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{ConsoleReporter, Formatter};

/// Runs the full pipeline over one archive directory.
pub async fn execute_process(
    args: ProcessArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let input_dir = args.input_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let output_dir = config.output_dir(args.output_dir.clone());
    let sentences = config.sentences(args.sentences);

    let messages = scan_directory(&input_dir)?;
    if messages.is_empty() {
        println!(
            "{}",
            formatter.warning(&format!("No .eml files found in {}", input_dir.display()))
        );
        return Ok(());
    }
    println!(
        "{}",
        formatter.info(&format!(
            "Loaded {} message(s) from {}",
            messages.len(),
            input_dir.display()
        ))
    );

    let reporter = ConsoleReporter::new(formatter);
    let key_points: Vec<Vec<String>> = messages
        .iter()
        .map(|message| summarize_message(message, sentences, &reporter))
        .collect();

    let pdf_paths: Vec<Option<PathBuf>> = if args.skip_pdf {
        vec![None; messages.len()]
    } else {
        let paths = render_pdfs(&messages, &output_dir.join("pdfs"))?;
        let count = paths.iter().flatten().count();
        println!("{}", formatter.success(&format!("Rendered {count} PDF(s)")));
        paths
    };

    let rtf_paths = render_rtfs(&messages, &output_dir.join("rtfs"))?;
    println!(
        "{}",
        formatter.success(&format!("Rendered {} RTF(s)", rtf_paths.len()))
    );

    let entries: Vec<DigestEntry> = messages
        .iter()
        .zip(&key_points)
        .zip(&pdf_paths)
        .map(|((message, points), pdf_path)| DigestEntry {
            message,
            key_points: points.clone(),
            pdf_path: pdf_path.clone(),
        })
        .collect();
    let report_path = output_dir.join("email_summary.html");
    write_report(&entries, &report_path)?;
    println!(
        "{}",
        formatter.success(&format!("Digest written to {}", report_path.display()))
    );

    if args.notion {
        let (token, database_id) =
            config.notion_credentials(args.notion_token.clone(), args.notion_database_id.clone())?;
        let client = NotionClient::new(token, database_id);
        let items: Vec<ExportItem> = messages
            .iter()
            .zip(&key_points)
            .zip(&pdf_paths)
            .map(|((message, points), pdf_path)| ExportItem {
                message,
                key_points: points.clone(),
                pdf_url: pdf_path.as_ref().map(|path| file_url(path)),
            })
            .collect();
        let outcome = export_messages(&client, &items).await?;
        println!(
            "{}",
            formatter.success(&format!(
                "Notion export: {} created, {} skipped",
                outcome.created.len(),
                outcome.skipped
            ))
        );
        if outcome.failed > 0 {
            println!(
                "{}",
                formatter.warning(&format!("{} message(s) failed to export", outcome.failed))
            );
        }
    }

    if !args.keep {
        let processed_dir = config.processed_dir(args.processed_dir.clone(), &input_dir);
        let moved = move_processed(&messages, &processed_dir, formatter)?;
        println!(
            "{}",
            formatter.success(&format!(
                "Moved {moved} message(s) to {}",
                processed_dir.display()
            ))
        );
    }

    Ok(())
}

/// Moves every source file into the processed directory, de-duplicating
/// destination names. Files that cannot be moved are reported and left in
/// place.
fn move_processed(
    messages: &[EmailMessage],
    processed_dir: &Path,
    formatter: &Formatter,
) -> Result<usize> {
    fs::create_dir_all(processed_dir)?;
    let mut used_names = HashSet::new();
    let mut moved = 0;
    for message in messages {
        let Some(name) = message.source_path.file_name() else {
            continue;
        };
        let target = deduplicate_path(&processed_dir.join(name), &mut used_names);
        match move_file(&message.source_path, &target) {
            Ok(()) => {
                info!(
                    "moved {} to {}",
                    message.source_path.display(),
                    target.display()
                );
                moved += 1;
            }
            Err(error) => {
                println!(
                    "{}",
                    formatter.warning(&format!(
                        "Could not move {}: {error}",
                        message.source_path.display()
                    ))
                );
            }
        }
    }
    Ok(moved)
}

/// Rename when possible, copy-and-delete when the rename crosses a
/// filesystem boundary.
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}
