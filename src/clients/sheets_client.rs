//! # Sheets Client
//!
//! [`SheetStore`] over the Google Sheets v4 `values` API, authenticated with
//! a bearer token from a `gcp_auth` token provider.
use crate::services::{Row, SheetStore, StorageError, CALL_TIMEOUT};
use async_trait::async_trait;
use gcp_auth::TokenProvider;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4";
const SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets"];

/// Client for one spreadsheet document.
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    spreadsheet_id: String,
    base_url: String,
}

impl SheetsClient {
    pub fn new(
        spreadsheet_id: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder()
            .timeout(CALL_TIMEOUT)
            .build()
            .map_err(|e| StorageError::Request(format!("http client setup failed: {e}")))?;
        Ok(Self {
            http,
            tokens,
            spreadsheet_id: spreadsheet_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Builds a client whose token provider comes from a service-account key
    /// file, or from the ambient Google credentials when `credentials` is
    /// `None`.
    pub async fn connect(
        spreadsheet_id: impl Into<String>,
        credentials: Option<&Path>,
    ) -> Result<Self, StorageError> {
        let tokens: Arc<dyn TokenProvider> = match credentials {
            Some(path) => Arc::new(
                gcp_auth::CustomServiceAccount::from_file(path)
                    .map_err(|e| StorageError::Auth(format!("{}: {e}", path.display())))?,
            ),
            None => gcp_auth::provider()
                .await
                .map_err(|e| StorageError::Auth(e.to_string()))?,
        };
        Self::new(spreadsheet_id, tokens)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn bearer(&self) -> Result<String, StorageError> {
        let token = self
            .tokens
            .token(SCOPES)
            .await
            .map_err(|e| StorageError::Auth(e.to_string()))?;
        Ok(token.as_str().to_string())
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StorageError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let detail = resp.text().await.unwrap_or_default();
        Err(StorageError::Request(format!("status={status} {detail}")))
    }
}

#[async_trait]
impl SheetStore for SheetsClient {
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    async fn append_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), StorageError> {
        let url = values_url(&self.base_url, &self.spreadsheet_id, range, ":append")?;
        let token = self.bearer().await?;

        let resp = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&serde_json::json!({ "values": rows }))
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        Self::check(resp).await?;
        debug!("Rows appended");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn read_rows(&self, range: &str) -> Result<Vec<Vec<String>>, StorageError> {
        let url = values_url(&self.base_url, &self.spreadsheet_id, range, "")?;
        let token = self.bearer().await?;

        let resp = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        let body: ValueRange = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;
        debug!(rows = body.values.len(), "Rows read");
        Ok(body.into_text_rows())
    }
}

/// Response body of `spreadsheets.values.get`. `values` is omitted for an
/// empty range.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl ValueRange {
    fn into_text_rows(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn values_url(
    base_url: &str,
    spreadsheet_id: &str,
    range: &str,
    suffix: &str,
) -> Result<reqwest::Url, StorageError> {
    let mut url = reqwest::Url::parse(base_url)
        .map_err(|e| StorageError::Request(format!("invalid base url: {e}")))?;
    let target = format!("{range}{suffix}");
    url.path_segments_mut()
        .map_err(|_| StorageError::Request(format!("base url cannot take a path: {base_url}")))?
        .pop_if_empty()
        .extend(["spreadsheets", spreadsheet_id, "values", target.as_str()]);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_url_for_append() {
        let url = values_url(DEFAULT_BASE_URL, "doc123", "Sheet1!A:I", ":append").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/doc123/values/Sheet1!A:I:append"
        );
    }

    #[test]
    fn test_values_url_escapes_sheet_names() {
        let url = values_url("http://localhost:8080/v4/", "doc", "Daily Orders!A:I", "").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v4/spreadsheets/doc/values/Daily%20Orders!A:I"
        );
    }

    #[test]
    fn test_empty_range_has_no_rows() {
        let body: ValueRange =
            serde_json::from_str(r#"{"range": "Sheet1!A1:I1000", "majorDimension": "ROWS"}"#).unwrap();
        assert!(body.into_text_rows().is_empty());
    }

    #[test]
    fn test_cells_rendered_as_text() {
        let body: ValueRange =
            serde_json::from_str(r#"{"values": [["Chicken", 2, 1.5, true, null]]}"#).unwrap();
        assert_eq!(
            body.into_text_rows(),
            vec![vec!["Chicken", "2", "1.5", "true", ""]]
        );
    }
}
