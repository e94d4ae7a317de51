//! Vendor indexer API client.
//!
//! The vault's decoded event log is served by a hosted indexer. The
//! client is constructed explicitly and handed to the
//! [`EventAggregator`](crate::chain::aggregator::EventAggregator) by
//! reference, so there is no hidden global state and tests can
//! substitute a fake [`EventSource`].

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::chain::events::RawContractEvent;

/// Indexer connection settings for one vault contract.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Root URL of the indexer API.
    pub api_url: Url,
    /// API key sent with every request.
    pub api_key: String,
    /// Address of the vault contract whose events are read.
    pub vault_address: String,
}

/// One page of an event query against the indexer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Event name filter; `None` selects all event types.
    pub event_name: Option<String>,
    pub from_block: Option<i64>,
    pub to_block: Option<i64>,
    /// Page size requested from the indexer.
    pub limit: u32,
    /// 1-based page number.
    pub page: u32,
}

/// Result of one indexer page fetch.
#[derive(Debug, Clone, Default)]
pub struct EventBatch {
    pub events: Vec<RawContractEvent>,
    /// Whether the indexer has further pages beyond this one.
    pub has_more: bool,
}

/// Errors from the indexer API.
#[derive(Debug, Error)]
pub enum EventSourceError {
    /// Transport failure talking to the indexer.
    #[error("indexer request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The indexer answered with an error payload.
    #[error("indexer API error: {0}")]
    Api(String),

    /// No API key was configured for the indexer.
    #[error("indexer API key is not configured")]
    MissingApiKey,
}

/// Source of decoded vault events.
///
/// Implemented by [`VaultEventClient`] for production and by in-memory
/// fakes in tests.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch one page of events matching the query.
    async fn fetch_events(&self, query: &EventQuery) -> Result<EventBatch, EventSourceError>;
}

/// HTTP client for the hosted indexer API.
pub struct VaultEventClient {
    config: ChainConfig,
    http: reqwest::Client,
}

const API_KEY_HEADER: &str = "X-Api-Key";

impl VaultEventClient {
    /// Create a new client.
    ///
    /// Fails immediately when no API key is configured, so a
    /// misconfigured deployment surfaces at startup instead of on the
    /// first request.
    pub fn new(config: ChainConfig) -> Result<Self, EventSourceError> {
        if config.api_key.is_empty() {
            return Err(EventSourceError::MissingApiKey);
        }
        Ok(Self {
            config,
            http: reqwest::Client::new(),
        })
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    fn events_url(&self) -> Result<Url, EventSourceError> {
        self.config
            .api_url
            .join(&format!(
                "v1/contracts/{}/events",
                urlencoding::encode(&self.config.vault_address)
            ))
            .map_err(|e| EventSourceError::Api(format!("invalid indexer URL: {e}")))
    }
}

/// Indexer response envelope. `status` is `"ok"` on success; anything
/// else carries a human-readable `message`.
#[derive(Debug, serde::Deserialize)]
struct IndexerResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: Option<IndexerResult>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexerResult {
    #[serde(default)]
    events: Vec<RawContractEvent>,
    #[serde(default)]
    has_more: bool,
}

#[async_trait]
impl EventSource for VaultEventClient {
    #[tracing::instrument(skip_all, err, name = "Indexer:fetch_events")]
    async fn fetch_events(&self, query: &EventQuery) -> Result<EventBatch, EventSourceError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.max(1).to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(name) = &query.event_name {
            params.push(("eventName", name.clone()));
        }
        if let Some(from) = query.from_block {
            params.push(("fromBlock", from.to_string()));
        }
        if let Some(to) = query.to_block {
            params.push(("toBlock", to.to_string()));
        }

        let response = self
            .http
            .get(self.events_url()?)
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(&params)
            .send()
            .await?;

        let response: IndexerResponse = response.json().await?;
        if response.status != "ok" {
            return Err(EventSourceError::Api(response.message));
        }

        let result = response.result.unwrap_or(IndexerResult {
            events: Vec::new(),
            has_more: false,
        });

        Ok(EventBatch {
            events: result.events,
            has_more: result.has_more,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> ChainConfig {
        ChainConfig {
            api_url: "https://indexer.example.com/".parse().unwrap(),
            api_key: api_key.to_owned(),
            vault_address: "0x00000000000000000000000000000000000000aa".to_owned(),
        }
    }

    #[test]
    fn test_missing_api_key_fails_at_construction() {
        assert!(matches!(
            VaultEventClient::new(config("")),
            Err(EventSourceError::MissingApiKey)
        ));
    }

    #[test]
    fn test_events_url_contains_vault_address() {
        let client = VaultEventClient::new(config("key")).unwrap();
        let url = client.events_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://indexer.example.com/v1/contracts/0x00000000000000000000000000000000000000aa/events"
        );
    }

    #[test]
    fn test_indexer_error_envelope_parses() {
        let body = r#"{"status":"error","message":"rate limited"}"#;
        let parsed: IndexerResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, "error");
        assert_eq!(parsed.message, "rate limited");
        assert!(parsed.result.is_none());
    }
}
