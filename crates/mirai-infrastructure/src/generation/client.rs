use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::sleep;
use url::Url;

use mirai_domain::shared::DomainError;

const USER_AGENT: &str = "mirai-diary/0.1";

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

/// Shared HTTP plumbing for the generation collaborators.
///
/// Retries on network errors, 5xx and 429; never on other 4xx. Backoff
/// doubles per attempt.
pub struct GenerationClient {
    client: Client,
    retry_config: RetryConfig,
    api_key: String,
}

impl GenerationClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_retry_config(api_key, timeout, RetryConfig::default())
    }

    pub fn with_retry_config(
        api_key: String,
        timeout: Duration,
        retry_config: RetryConfig,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            retry_config,
            api_key,
        })
    }

    pub(super) async fn post_json<B, T>(
        &self,
        url: &Url,
        body: &B,
        operation: &str,
    ) -> Result<T, DomainError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut attempt = 0;
        let mut backoff = self.retry_config.initial_backoff;

        loop {
            attempt += 1;
            match self.try_post(url, body).await {
                Ok(parsed) => return Ok(parsed),
                Err(err) if err.retryable && attempt <= self.retry_config.max_retries => {
                    warn!(
                        "[generation] {} attempt {}/{} failed, retrying in {:?}: {}",
                        operation, attempt, self.retry_config.max_retries, backoff, err.message
                    );
                    sleep(backoff).await;
                    backoff *= 2;
                }
                Err(err) => {
                    return Err(DomainError::Generation(format!(
                        "{} failed after {} attempt(s): {}",
                        operation, attempt, err.message
                    )));
                }
            }
        }
    }

    async fn try_post<B, T>(&self, url: &Url, body: &B) -> Result<T, RequestError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| RequestError {
                message: e.to_string(),
                retryable: true,
            })?;

        let status = response.status();
        debug!("[generation] POST {} -> {}", url, status);

        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RequestError {
                message: format!("server returned {}", status),
                retryable: true,
            });
        }
        if !status.is_success() {
            return Err(RequestError {
                message: format!("server returned {}", status),
                retryable: false,
            });
        }

        response.json::<T>().await.map_err(|e| RequestError {
            message: format!("invalid response body: {}", e),
            retryable: false,
        })
    }
}

struct RequestError {
    message: String,
    retryable: bool,
}
