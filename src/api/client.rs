use super::constants::{self, headers};
use super::error::ApiFailure;
use super::models::{EntryPage, Language, NewTimeEntry, TimeEntry};
use log::debug;
use serde_json::Value;
use std::time::Duration;

/// Dreaming API client with connection pooling, bound to one account's
/// bearer token. Calls are issued strictly sequentially by the migration;
/// the client itself holds no mutable state.
pub struct DreamingClient {
    base_url: String,
    http_client: reqwest::Client,
    access_token: String,
}

impl DreamingClient {
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(constants::DEFAULT_API_URL.to_string(), access_token)
    }

    /// Create a client against a non-default base URL (tests, self-hosted
    /// deployments).
    pub fn with_base_url(base_url: String, access_token: String) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(constants::USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url,
            http_client,
            access_token,
        }
    }

    /// Fetch every time entry for a language, following cursor pagination
    /// until the service stops returning a next cursor. Returns one combined
    /// sequence in service order.
    pub async fn list_time_entries(
        &self,
        language: Language,
    ) -> Result<Vec<TimeEntry>, ApiFailure> {
        let url = constants::external_time_endpoint(&self.base_url);
        let mut entries = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_number = 1usize;

        loop {
            let mut request = self
                .http_client
                .get(&url)
                .bearer_auth(&self.access_token)
                .header("Accept", headers::CONTENT_TYPE_JSON)
                .query(&[("language", language.code())]);
            if let Some(cursor) = cursor.as_deref() {
                request = request.query(&[("cursor", cursor)]);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(ApiFailure::from_response(status, body));
            }

            let json: Value = response.json().await?;
            let page = EntryPage::from_json(json);
            debug!(
                "Fetched page {} with {} entries",
                page_number,
                page.entries.len()
            );
            entries.extend(page.entries);

            match page.next_cursor {
                Some(next) => {
                    cursor = Some(next);
                    page_number += 1;
                }
                None => break,
            }
        }

        debug!(
            "Fetched {} entries across {} page(s)",
            entries.len(),
            page_number
        );
        Ok(entries)
    }

    /// Create one time entry on the account this client is bound to.
    /// Any 2xx response counts as success.
    pub async fn create_time_entry(
        &self,
        language: Language,
        entry: &NewTimeEntry,
    ) -> Result<(), ApiFailure> {
        let url = constants::external_time_endpoint(&self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
            .query(&[("language", language.code())])
            .json(entry)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Created entry '{}' ({})", entry.title, status);
            Ok(())
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ApiFailure::from_response(status, body))
        }
    }
}
