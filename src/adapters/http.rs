use crate::utils::error::Result;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;

/// Transport-level retry/timeout policy, shared by the qkamura and slack
/// clients.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_wait_min: Duration,
    pub retry_wait_max: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 2,
            retry_wait_min: Duration::from_secs(3),
            retry_wait_max: Duration::from_secs(10),
        }
    }
}

/// Retrying wrapper around a shared `reqwest::Client`.
///
/// Transport failures and 5xx/429 responses are retried up to `max_retries`
/// extra attempts, waiting a jittered exponential interval clamped to
/// [retry_wait_min, retry_wait_max] between attempts. Anything else is returned
/// to the caller as-is.
#[derive(Debug, Clone)]
pub struct RetryingClient {
    inner: Client,
    config: HttpConfig,
}

impl RetryingClient {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let inner = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { inner, config })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.inner.get(url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.inner.post(url)
    }

    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        for attempt in 0..self.config.max_retries {
            let Some(current) = request.try_clone() else {
                // streaming bodies cannot be replayed, single attempt only
                return Ok(request.send().await?);
            };
            match current.send().await {
                Ok(response) if !retryable_status(response.status()) => return Ok(response),
                Ok(response) => {
                    tracing::warn!(
                        status = %response.status(),
                        attempt,
                        "transient upstream status, retrying"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, attempt, "request failed, retrying");
                }
            }
            tokio::time::sleep(self.backoff(attempt)).await;
        }
        Ok(request.send().await?)
    }

    /// Exponential backoff with jitter, clamped to the configured wait window.
    fn backoff(&self, attempt: u32) -> Duration {
        let min = self.config.retry_wait_min.as_millis() as f64;
        let max = self.config.retry_wait_max.as_millis() as f64;
        let base = min * 2f64.powi(attempt as i32);
        let jitter = rand::random::<f64>() * min;
        Duration::from_millis((base + jitter).min(max) as u64)
    }
}

fn retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}
