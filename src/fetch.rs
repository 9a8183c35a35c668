//! Model-listing fetcher for OpenAI-compatible local servers.
//!
//! All three supported servers expose `GET {base}/v1/models` returning
//! `{"data": [{"id": "..."}]}`. One attempt per server, bounded by a fixed
//! timeout; every failure mode collapses to the same outcome as far as the
//! config merge is concerned, with the underlying error kept for logging.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// How long to wait for a server before declaring it unavailable.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

/// Build the shared HTTP client with the fetch timeout applied.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")
}

/// Fetch the list of model identifiers served at `url`, in the order the
/// server reports them. Any failure (timeout, refused connection, non-200
/// status, malformed body) is an error; no retries, no partial results.
pub async fn list_models(client: &reqwest::Client, url: &str) -> Result<Vec<String>> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?;

    if response.status() != StatusCode::OK {
        anyhow::bail!("server returned status {}", response.status());
    }

    let models: ModelsResponse = response
        .json()
        .await
        .context("failed to parse model list response")?;

    Ok(models.data.into_iter().map(|m| m.id).collect())
}
