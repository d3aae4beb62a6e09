//! The export loop: schema check, duplicate probe, record creation.

use mailgist_domain::EmailMessage;
use tracing::{info, warn};

use crate::client::NotionClient;
use crate::error::NotionError;

/// One message queued for export.
pub struct ExportItem<'a> {
    /// The message to publish.
    pub message: &'a EmailMessage,
    /// Key points extracted from the message body.
    pub key_points: Vec<String>,
    /// URL of the generated PDF to attach to the created page, if any.
    pub pdf_url: Option<String>,
}

/// What an export run produced.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    /// Ids of the pages created, in input order.
    pub created: Vec<String>,
    /// Messages skipped because a matching record already existed.
    pub skipped: usize,
    /// Messages whose record could not be created.
    pub failed: usize,
}

/// Publishes every item to the configured database.
///
/// The database schema is validated once up front; a mismatch aborts the
/// whole run. After that, failures are per-message: a failed duplicate
/// probe is treated as "no duplicate" and a failed creation is logged and
/// skipped, so one bad message never sinks the batch.
pub async fn export_messages(
    client: &NotionClient,
    items: &[ExportItem<'_>],
) -> Result<ExportOutcome, NotionError> {
    client.retrieve_schema().await?;

    let mut outcome = ExportOutcome::default();
    for item in items {
        let message = item.message;
        let duplicate = match client
            .query_existing(&message.subject, message.date.as_ref())
            .await
        {
            Ok(duplicate) => duplicate,
            Err(error) => {
                warn!(
                    "duplicate check failed for '{}': {error}",
                    message.subject
                );
                false
            }
        };
        if duplicate {
            info!("skipping '{}': already in the database", message.subject);
            outcome.skipped += 1;
            continue;
        }

        match client.create_record(message, &item.key_points).await {
            Ok(page_id) => {
                if let Some(url) = &item.pdf_url {
                    if let Err(error) = client
                        .upload_attachment(&page_id, "Generated PDF", url)
                        .await
                    {
                        warn!(
                            "attachment upload failed for '{}': {error}",
                            message.subject
                        );
                    }
                }
                info!("created Notion page for '{}'", message.subject);
                outcome.created.push(page_id);
            }
            Err(error) => {
                warn!("export failed for '{}': {error}", message.subject);
                outcome.failed += 1;
            }
        }
    }
    Ok(outcome)
}
