//! Runtime configuration types shared between the server and its
//! background tasks.

pub mod admin;

pub use admin::AdminConfig;

use std::time::Duration;

/// Per-IP rate limit applied to the `/api` surface.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Length of the fixed window.
    pub window: Duration,
    /// Maximum requests per IP per window.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(900_000),
            max_requests: 100,
        }
    }
}
