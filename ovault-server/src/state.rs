//! Application state shared across all request handlers.

use crate::api::rate_limit::RateLimiter;
use crate::config::runtime::SharedConfig;
use ovault_core::chain::{EventAggregator, VaultEventClient};
use sqlx::PgPool;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Reloadable configuration (swapped via SIGHUP).
    pub config: SharedConfig,
    /// Vault event aggregator over the indexer client.
    pub vault: Arc<EventAggregator<VaultEventClient>>,
    /// Per-IP request counters for the `/api` rate limit.
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Create a new AppState.
    pub fn new(
        db: PgPool,
        config: SharedConfig,
        vault: Arc<EventAggregator<VaultEventClient>>,
    ) -> Self {
        Self {
            db,
            config,
            vault,
            rate_limiter: Arc::new(RateLimiter::new()),
        }
    }
}
