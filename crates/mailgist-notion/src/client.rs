//! Notion REST API client.
//!
//! A narrow interface over the handful of endpoints the exporter needs:
//! database retrieval, duplicate queries, page creation, block appends and
//! database setup. All communication is async with retry and exponential
//! backoff on transient failures.

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use mailgist_domain::EmailMessage;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use crate::error::NotionError;

/// Base URL of the Notion REST API.
pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// API revision sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Default timeout for Notion requests (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts for transient failures.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Notion rejects rich text fragments longer than this many characters.
pub const MAX_TEXT_LEN: usize = 2_000;

/// Name used for the database status property value on created records.
pub const STATUS_PROCESSED: &str = "Processed";

/// Human-facing date format for the page body details, matching the
/// rendered documents.
const DATE_FORMAT_DISPLAY: &str = "%B %d, %Y at %I:%M %p";

/// Property names and types the target database must carry.
const EXPECTED_SCHEMA: &[(&str, &str)] = &[
    ("Name", "title"),
    ("Sender", "rich_text"),
    ("Date", "date"),
    ("Recipients", "rich_text"),
    ("Key Points", "rich_text"),
    ("Status", "select"),
];

/// Client for one Notion integration and one target database.
pub struct NotionClient {
    token: String,
    database_id: String,
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl NotionClient {
    /// Create a client for the given integration token and database.
    pub fn new(token: impl Into<String>, database_id: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            token: token.into(),
            database_id: database_id.into(),
            base_url: NOTION_API_BASE.to_string(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the maximum number of attempts for transient failures.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Point the client at a different API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches the target database and checks it against the expected
    /// schema.
    ///
    /// # Errors
    ///
    /// [`NotionError::SchemaMismatch`] lists every missing or mistyped
    /// property in one message.
    pub async fn retrieve_schema(&self) -> Result<(), NotionError> {
        let url = format!("{}/databases/{}", self.base_url, self.database_id);
        let database = self.request(Method::GET, &url, None).await?;
        validate_schema(&database)
    }

    /// Returns whether a record for this subject and calendar date already
    /// exists in the database.
    pub async fn query_existing(
        &self,
        subject: &str,
        date: Option<&DateTime<FixedOffset>>,
    ) -> Result<bool, NotionError> {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        let body = duplicate_filter(subject, date);
        let response = self.request(Method::POST, &url, Some(&body)).await?;
        let results = response.get("results").and_then(Value::as_array);
        Ok(results.is_some_and(|results| !results.is_empty()))
    }

    /// Creates one database record for a message and returns the new page
    /// id.
    pub async fn create_record(
        &self,
        message: &EmailMessage,
        key_points: &[String],
    ) -> Result<String, NotionError> {
        let url = format!("{}/pages", self.base_url);
        let body = page_payload(&self.database_id, message, key_points);
        let response = self.request(Method::POST, &url, Some(&body)).await?;
        response
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| NotionError::Transient("created page carried no id".to_string()))
    }

    /// Appends an external file block (for example a generated PDF) to an
    /// existing page.
    pub async fn upload_attachment(
        &self,
        page_id: &str,
        name: &str,
        file_url: &str,
    ) -> Result<(), NotionError> {
        let url = format!("{}/blocks/{}/children", self.base_url, page_id);
        let body = json!({
            "children": [{
                "object": "block",
                "type": "file",
                "file": {
                    "type": "external",
                    "external": { "url": file_url },
                    "caption": [text_fragment(name)]
                }
            }]
        });
        self.request(Method::PATCH, &url, Some(&body)).await?;
        Ok(())
    }

    /// Creates a database with the expected schema under a parent page and
    /// returns the new database id.
    pub async fn setup_database(
        &self,
        parent_page_id: &str,
        title: &str,
    ) -> Result<String, NotionError> {
        let url = format!("{}/databases", self.base_url);
        let body = json!({
            "parent": { "type": "page_id", "page_id": parent_page_id },
            "title": [text_fragment(title)],
            "properties": {
                "Name": { "title": {} },
                "Sender": { "rich_text": {} },
                "Date": { "date": {} },
                "Recipients": { "rich_text": {} },
                "Key Points": { "rich_text": {} },
                "Status": { "select": { "options": [
                    { "name": "Processed", "color": "green" },
                    { "name": "Reviewed", "color": "blue" },
                    { "name": "Archived", "color": "gray" }
                ] } }
            }
        });
        let response = self.request(Method::POST, &url, Some(&body)).await?;
        response
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| NotionError::Transient("created database carried no id".to_string()))
    }

    /// Sends one request with auth headers, mapping failures into the
    /// closed error set and retrying transient ones with exponential
    /// backoff.
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, NotionError> {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let mut request = self
                .client
                .request(method.clone(), url)
                .bearer_auth(&self.token)
                .header("Notion-Version", NOTION_VERSION);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json::<Value>().await.map_err(|e| {
                            NotionError::Transient(format!("unreadable response body: {e}"))
                        });
                    }
                    if status == StatusCode::UNAUTHORIZED {
                        return Err(NotionError::Unauthorized);
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(NotionError::NotFound(url.to_string()));
                    }
                    if status == StatusCode::BAD_REQUEST {
                        let detail = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "no detail".to_string());
                        return Err(NotionError::SchemaMismatch(detail));
                    }
                    // 429 and 5xx fall through to the retry path
                    let detail = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "no detail".to_string());
                    last_error = Some(NotionError::Transient(format!("HTTP {status}: {detail}")));
                }
                Err(e) => {
                    last_error = Some(NotionError::Transient(format!("request failed: {e}")));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| NotionError::Transient("max retries exceeded".to_string())))
    }
}

/// Truncates text to the longest prefix Notion will accept, cutting on a
/// character boundary.
pub fn truncate_for_notion(text: &str) -> String {
    match text.char_indices().nth(MAX_TEXT_LEN) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn validate_schema(database: &Value) -> Result<(), NotionError> {
    let properties = database
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            NotionError::SchemaMismatch("database response carries no properties".to_string())
        })?;

    let mut problems = Vec::new();
    for (name, expected_type) in EXPECTED_SCHEMA {
        match properties.get(*name) {
            None => problems.push(format!("missing property '{name}'")),
            Some(property) => {
                let actual = property
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                if actual != *expected_type {
                    problems.push(format!(
                        "property '{name}' has type {actual}, expected {expected_type}"
                    ));
                }
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(NotionError::SchemaMismatch(problems.join("; ")))
    }
}

/// Query body matching records with the same subject and calendar date.
///
/// The subject goes through the same placeholder and truncation rules as
/// the created page title, so the query finds what an earlier run wrote.
fn duplicate_filter(subject: &str, date: Option<&DateTime<FixedOffset>>) -> Value {
    let mut filters = vec![json!({
        "property": "Name",
        "title": { "equals": truncate_for_notion(&display_subject(subject)) }
    })];
    if let Some(date) = date {
        filters.push(json!({
            "property": "Date",
            "date": { "equals": date.format("%Y-%m-%d").to_string() }
        }));
    }
    json!({ "filter": { "and": filters }, "page_size": 1 })
}

fn display_subject(subject: &str) -> String {
    let trimmed = subject.trim();
    if trimmed.is_empty() {
        "(No Subject)".to_string()
    } else {
        trimmed.to_string()
    }
}

fn text_fragment(text: &str) -> Value {
    json!({ "type": "text", "text": { "content": truncate_for_notion(text) } })
}

/// Full page-creation payload: database parent, properties and body blocks.
fn page_payload(database_id: &str, message: &EmailMessage, key_points: &[String]) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "Name".to_string(),
        json!({ "title": [text_fragment(&display_subject(&message.subject))] }),
    );
    properties.insert(
        "Sender".to_string(),
        json!({ "rich_text": [text_fragment(&message.sender)] }),
    );
    if let Some(date) = &message.date {
        properties.insert(
            "Date".to_string(),
            json!({ "date": { "start": date.to_rfc3339() } }),
        );
    }
    properties.insert(
        "Recipients".to_string(),
        json!({ "rich_text": [text_fragment(&message.recipients.join(", "))] }),
    );
    properties.insert(
        "Key Points".to_string(),
        json!({ "rich_text": [text_fragment(&key_points.join("\n"))] }),
    );
    properties.insert(
        "Status".to_string(),
        json!({ "select": { "name": STATUS_PROCESSED } }),
    );

    json!({
        "parent": { "database_id": database_id },
        "properties": properties,
        "children": block_children(message, key_points)
    })
}

/// Page body: a key points section, a divider, then the header details.
fn block_children(message: &EmailMessage, key_points: &[String]) -> Vec<Value> {
    let mut blocks = vec![json!({
        "object": "block",
        "type": "heading_2",
        "heading_2": { "rich_text": [text_fragment("Key Points")] }
    })];
    for point in key_points {
        blocks.push(json!({
            "object": "block",
            "type": "bulleted_list_item",
            "bulleted_list_item": { "rich_text": [text_fragment(point)] }
        }));
    }
    blocks.push(json!({ "object": "block", "type": "divider", "divider": {} }));
    blocks.push(json!({
        "object": "block",
        "type": "heading_2",
        "heading_2": { "rich_text": [text_fragment("Email Details")] }
    }));
    let recipients = if message.recipients.is_empty() {
        "Unknown".to_string()
    } else {
        message.recipients.join(", ")
    };
    for detail in [
        format!("From: {}", message.sender),
        format!("To: {recipients}"),
        format!(
            "Date: {}",
            message
                .date
                .map(|date| date.format(DATE_FORMAT_DISPLAY).to_string())
                .unwrap_or_else(|| "Unknown".to_string())
        ),
    ] {
        blocks.push(json!({
            "object": "block",
            "type": "paragraph",
            "paragraph": { "rich_text": [text_fragment(&detail)] }
        }));
    }
    blocks
}
