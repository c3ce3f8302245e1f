use async_trait::async_trait;

use crate::error::PollError;
use crate::status::{StatusResponse, VideoId};

/// Where status answers come from.
///
/// Mirrors the HTTP endpoint's shape so the poll loop can be driven by a
/// scripted source in tests.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, id: &VideoId) -> Result<StatusResponse, PollError>;
}

/// Status source backed by the chat application's HTTP endpoint.
pub struct HttpStatusSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStatusSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Endpoint path for one video. The id is substituted raw, matching the
    /// route the server exposes.
    fn status_url(&self, id: &VideoId) -> String {
        format!("{}/videos/{}/status/", self.base_url, id)
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch_status(&self, id: &VideoId) -> Result<StatusResponse, PollError> {
        let response = self.client.get(self.status_url(id)).send().await?;

        if !response.status().is_success() {
            return Err(PollError::Http {
                status: response.status(),
            });
        }

        // Read the body as text first so a malformed payload surfaces as a
        // parse error rather than a transport error.
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
