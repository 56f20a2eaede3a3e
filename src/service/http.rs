//! HTTP client for the remote clients API.

use crate::{
    config::SyncConfig,
    domain::{Client, ClientId},
    error::{BoardError, Result},
    service::{ClientService, ClientUpdate},
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

const BACKOFF_MULTIPLIER: u32 = 2;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Delay before retry number `attempt` (0-based), capped at `MAX_RETRY_DELAY`
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(BACKOFF_MULTIPLIER.saturating_pow(attempt))
        .min(MAX_RETRY_DELAY)
}

/// `ClientService` backed by the REST API at `SyncConfig::base_url`
#[derive(Debug, Clone)]
pub struct HttpClientService {
    client: reqwest::Client,
    config: SyncConfig,
}

impl HttpClientService {
    pub fn new(config: SyncConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Map a non-2xx response to `BoardError::Api`
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(BoardError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn read_clients(response: Response) -> Result<Vec<Client>> {
        let response = Self::check_response(response).await?;
        Ok(response.json::<Vec<Client>>().await?)
    }

    /// Sends a request, retrying transient failures with exponential backoff
    async fn send_with_retry<F>(&self, build: F) -> Result<Vec<Client>>
    where
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        let mut attempt = 0;
        loop {
            let result = match build().send().await {
                Ok(response) => Self::read_clients(response).await,
                Err(e) => Err(e.into()),
            };

            match result {
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    let delay = backoff_delay(self.config.retry_delay, attempt);
                    warn!(attempt, ?delay, error = %e, "Request failed, retrying");
                    sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

#[async_trait]
impl ClientService for HttpClientService {
    #[instrument(skip(self))]
    async fn list_clients(&self) -> Result<Vec<Client>> {
        let url = self.config.clients_url();
        let clients = self.send_with_retry(|| self.client.get(&url)).await?;
        debug!(count = clients.len(), "Fetched clients");
        Ok(clients)
    }

    #[instrument(skip(self))]
    async fn update_client(&self, id: &ClientId, update: &ClientUpdate) -> Result<Vec<Client>> {
        let url = self.config.client_url(id);
        let clients = self
            .send_with_retry(|| self.client.put(&url).json(update))
            .await?;
        debug!(count = clients.len(), "Updated client");
        Ok(clients)
    }
}
