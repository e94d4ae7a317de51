//! TOML file configuration structures.
//!
//! These structs directly map to the `ovault-config.toml` file format.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub server: ServerSection,
    pub admin: AdminSection,
    pub chain: ChainSection,
    #[serde(default)]
    pub rate_limit: RateLimitSection,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
    /// Origins allowed by CORS. Empty means any origin (development).
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Directory holding the built single-page app; its `index.html`
    /// is served for unmatched GET routes.
    #[serde(default = "default_spa_dist")]
    pub spa_dist: PathBuf,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_spa_dist() -> PathBuf {
    PathBuf::from("./dist")
}

/// Admin configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSection {
    /// The admin secret. If this is plaintext (doesn't start with
    /// `$argon2`), it will be hashed and the config file rewritten.
    pub secret: String,
}

/// Indexer / vault contract configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSection {
    /// Root URL of the hosted indexer API.
    pub api_url: Url,
    /// Indexer API key.
    pub api_key: String,
    /// Address of the vault contract.
    pub vault_address: String,
}

/// Rate limiting section applied to `/api`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSection {
    #[serde(default = "default_rate_limit_window_ms")]
    pub window_ms: u64,
    #[serde(default = "default_rate_limit_max_requests")]
    pub max_requests: u32,
}

impl Default for RateLimitSection {
    fn default() -> Self {
        Self {
            window_ms: default_rate_limit_window_ms(),
            max_requests: default_rate_limit_max_requests(),
        }
    }
}

fn default_rate_limit_window_ms() -> u64 {
    900_000 // 15 minutes
}

fn default_rate_limit_max_requests() -> u32 {
    100
}

impl FileConfig {
    /// Whether the stored admin secret is already an argon2 hash.
    pub fn is_admin_secret_hashed(&self) -> bool {
        self.admin.secret.starts_with("$argon2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [server]
        listen = "127.0.0.1:3000"

        [admin]
        secret = "plaintext-secret"

        [chain]
        api_url = "https://indexer.example.com/"
        api_key = "test-key"
        vault_address = "0x00000000000000000000000000000000000000aa"
    "#;

    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let config: FileConfig = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.server.spa_dist, PathBuf::from("./dist"));
        assert_eq!(config.rate_limit.window_ms, 900_000);
        assert_eq!(config.rate_limit.max_requests, 100);
        assert!(!config.is_admin_secret_hashed());
    }

    #[test]
    fn test_hashed_secret_detected() {
        let mut config: FileConfig = toml::from_str(MINIMAL).unwrap();
        config.admin.secret = "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_owned();
        assert!(config.is_admin_secret_hashed());
    }

    #[test]
    fn test_rate_limit_section_overrides() {
        let toml_str = format!("{MINIMAL}\n[rate_limit]\nwindow_ms = 60000\nmax_requests = 5\n");
        let config: FileConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.rate_limit.max_requests, 5);
    }
}
