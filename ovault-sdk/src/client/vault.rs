//! Vault event API client (read-only on-chain projections).

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::Envelope;
use crate::objects::events::{
    RecentActivityResponse, VaultEventsQuery, VaultEventsResponse, VaultStatsResponse,
};

/// Typed HTTP client for the vault event API.
///
/// All endpoints are public and read-only; the server never exposes a
/// write path to the chain.
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: Client,
    base_url: Url,
}

impl VaultClient {
    /// Create a new `VaultClient` for the given server root URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /api/vault/activity` – recent deposits, withdrawals and
    /// yield claims.
    pub async fn activity(&self) -> Result<Envelope<RecentActivityResponse>, ClientError> {
        let url = self.base_url.join("/api/vault/activity")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/vault/stats` – aggregated vault statistics.
    pub async fn stats(&self) -> Result<Envelope<VaultStatsResponse>, ClientError> {
        let url = self.base_url.join("/api/vault/stats")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/vault/events` – filtered event listing.
    pub async fn events(
        &self,
        query: &VaultEventsQuery,
    ) -> Result<Envelope<VaultEventsResponse>, ClientError> {
        let url = self.base_url.join("/api/vault/events")?;
        let resp = self.http.get(url).query(query).send().await?;
        parse_response(resp).await
    }
}
