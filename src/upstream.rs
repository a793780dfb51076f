//! HTTP client for the upstream todos API.

use serde_json::Value;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned {status} for {url}")]
    Status { status: u16, url: String },
}

pub struct UpstreamApi {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamApi {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch the todos document, forwarding the caller's raw query string verbatim.
    pub async fn fetch_todos(&self, query: Option<&str>) -> Result<Value, UpstreamError> {
        let url = match query {
            Some(q) => format!("{}?{q}", self.base_url),
            None => self.base_url.clone(),
        };

        debug!(url = %url, "fetching todos from upstream");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(resp.json::<Value>().await?)
    }
}
