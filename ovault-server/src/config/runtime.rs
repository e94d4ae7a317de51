//! Runtime configuration types.
//!
//! Startup-only settings (listen address, SPA directory, indexer
//! connection) are consumed once; the reloadable sections live behind
//! `Arc<RwLock<...>>` in [`SharedConfig`] and are swapped on SIGHUP.

use ovault_core::chain::ChainConfig;
use ovault_core::config::{AdminConfig, RateLimitConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Startup-only server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub cors_origins: Vec<String>,
    pub spa_dist: PathBuf,
}

/// All configuration parts produced by a (re)load.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub chain: ChainConfig,
    pub rate_limit: RateLimitConfig,
}

impl LoadedConfig {
    /// Convert into a SharedConfig with separate locks per reloadable
    /// section.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig {
            admin: Arc::new(RwLock::new(self.admin)),
            rate_limit: Arc::new(RwLock::new(self.rate_limit)),
        }
    }
}

/// Reloadable configuration shared across request handlers.
#[derive(Clone)]
pub struct SharedConfig {
    pub admin: Arc<RwLock<AdminConfig>>,
    pub rate_limit: Arc<RwLock<RateLimitConfig>>,
}
