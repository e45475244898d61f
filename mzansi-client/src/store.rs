//! Remote document store
//!
//! Upsert-by-id semantics for reports: `save_report` is keyed by
//! `report_id` and idempotent, `fetch_reports` queries by owner and sorts
//! newest-first client-side.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use shared::models::IssueReport;

use crate::{ClientConfig, ClientError, ClientResult};

/// Remote document store collaborator
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Upsert a report under the given owner. Re-saving the same
    /// `report_id` overwrites, never duplicates.
    async fn save_report(&self, user_id: &str, report: &IssueReport) -> ClientResult<()>;

    /// Fetch all reports owned by the user, newest-first.
    async fn fetch_reports(&self, user_id: &str) -> ClientResult<Vec<IssueReport>>;
}

/// Report document as stored remotely: the report plus owner/bookkeeping
#[derive(Debug, Serialize, Deserialize)]
struct StoredReport {
    #[serde(flatten)]
    report: IssueReport,
    user_id: String,
    saved_at: String,
}

/// HTTP document store client
#[derive(Debug, Clone)]
pub struct RestDocumentStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestDocumentStore {
    /// Create a new store client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.store_base_url.clone(),
            token: None,
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    /// Map an error response to a classified client error
    async fn handle_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::Validation(text),
            _ => ClientError::Internal(text),
        }
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn save_report(&self, user_id: &str, report: &IssueReport) -> ClientResult<()> {
        let document = StoredReport {
            report: report.clone(),
            user_id: user_id.to_string(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        };

        let url = self.url(&format!("reports/{}", report.report_id()));
        let mut request = self.client.put(&url).json(&document);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        tracing::debug!(report_id = %report.report_id(), "report saved to remote store");
        Ok(())
    }

    async fn fetch_reports(&self, user_id: &str) -> ClientResult<Vec<IssueReport>> {
        let url = self.url("reports");
        let mut request = self.client.get(&url).query(&[("owner", user_id)]);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        let documents: Vec<StoredReport> = response.json().await?;
        let mut reports: Vec<IssueReport> = documents.into_iter().map(|d| d.report).collect();
        // Sorted client-side to avoid requiring a server-side index
        reports.sort_by_key(|r| std::cmp::Reverse(r.created_at));
        Ok(reports)
    }
}
