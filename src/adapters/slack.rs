use crate::adapters::http::RetryingClient;
use crate::domain::model::PostMessage;
use crate::utils::error::{QkamuraError, Result};
use reqwest::StatusCode;

/// Client for Slack's `chat.postMessage` endpoint.
pub struct SlackClient {
    http: RetryingClient,
    scheme: String,
    host: String,
}

impl SlackClient {
    pub fn new(http: RetryingClient, scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            http,
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Posts `message` to `channel`.
    ///
    /// HTTP 200 alone is treated as success; the application-level `ok` flag
    /// Slack puts in the response body is not inspected.
    pub async fn post(&self, channel: &str, token: &str, message: &str) -> Result<()> {
        let url = format!("{}://{}/api/chat.postMessage", self.scheme, self.host);
        let body = PostMessage {
            channel: channel.to_string(),
            text: message.to_string(),
        };
        let request = self.http.post(&url).bearer_auth(token).json(&body);

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(QkamuraError::UpstreamError {
                service: "slack".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
