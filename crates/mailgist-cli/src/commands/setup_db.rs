//! The setup-db command: create a conforming Notion database.

use mailgist_notion::NotionClient;

use crate::cli::SetupDbArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Creates the summary database under the given parent page.
pub async fn execute_setup_db(
    args: SetupDbArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let token = config.notion_token(args.notion_token.clone())?;

    let client = NotionClient::new(token, String::new());
    let database_id = client.setup_database(&args.parent_page, &args.title).await?;

    println!(
        "{}",
        formatter.success(&format!("Created database '{}'", args.title))
    );
    println!(
        "{}",
        formatter.info(&format!(
            "Set NOTION_DATABASE_ID={database_id} (or database_id under [notion] in the config file) to export into it"
        ))
    );
    Ok(())
}
