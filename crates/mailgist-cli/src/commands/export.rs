//! The export command: publish summaries to Notion, nothing else.

use std::path::PathBuf;

use mailgist_loader::scan_directory;
use mailgist_notion::{export_messages, ExportItem, NotionClient};
use mailgist_pipeline::summarize_message;

use crate::cli::ExportArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{ConsoleReporter, Formatter};

/// Summarizes an archive directory and publishes the results to Notion.
pub async fn execute_export(
    args: ExportArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let input_dir = args.input_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let sentences = config.sentences(args.sentences);
    let (token, database_id) =
        config.notion_credentials(args.notion_token.clone(), args.notion_database_id.clone())?;

    let messages = scan_directory(&input_dir)?;
    if messages.is_empty() {
        println!(
            "{}",
            formatter.warning(&format!("No .eml files found in {}", input_dir.display()))
        );
        return Ok(());
    }

    let reporter = ConsoleReporter::new(formatter);
    let items: Vec<ExportItem> = messages
        .iter()
        .map(|message| ExportItem {
            message,
            key_points: summarize_message(message, sentences, &reporter),
            pdf_url: None,
        })
        .collect();

    let client = NotionClient::new(token, database_id);
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
    Ok(())
}
