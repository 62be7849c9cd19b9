//! HTTP client for the analytics backend.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::ClientError;

/// Successful backend response: the generated SQL (displayed verbatim, never
/// parsed here) plus the result payload to classify.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub sql_query: String,
    #[serde(default)]
    pub results: Value,
}

pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout()))
            .build()?;

        Ok(Self {
            client,
            base: cfg.base_url(),
        })
    }

    /// Submit a question. The question is assumed already trimmed and
    /// non-empty; the handlers validate before calling.
    pub async fn ask(&self, question: &str) -> Result<QueryResponse, ClientError> {
        let url = format!("{}/consulta", self.base.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "question": question }))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            resp.json::<QueryResponse>()
                .await
                .map_err(|e| ClientError::Transport(format!("invalid response body: {}", e)))
        } else {
            // failed requests carry an error field when the backend had
            // anything to say
            let msg = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| format!("request failed with status {}", status));
            Err(ClientError::Transport(msg))
        }
    }
}
