//! Per-IP fixed-window rate limiting for the `/api` surface.
//!
//! Window length and request budget come from the reloadable
//! `rate_limit` config section: at most N requests per IP per window.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;
use std::time::Instant;

use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use ovault_core::config::RateLimitConfig;
use ovault_sdk::objects::ErrorBody;

use crate::state::AppState;

/// Entries above this count trigger a sweep of expired windows.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Per-IP fixed-window request counters.
pub struct RateLimiter {
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request from `ip` at `now`; returns whether it is
    /// within budget.
    pub fn check_at(&self, ip: IpAddr, now: Instant, config: RateLimitConfig) -> bool {
        let Ok(mut windows) = self.windows.lock() else {
            // A poisoned lock means a panic elsewhere; fail open.
            return true;
        };

        if windows.len() > SWEEP_THRESHOLD {
            windows.retain(|_, w| now.duration_since(w.started) < config.window);
        }

        let window = windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(window.started) >= config.window {
            window.started = now;
            window.count = 0;
        }
        window.count += 1;
        window.count <= config.max_requests
    }
}

/// Axum middleware enforcing the rate limit.
pub async fn rate_limit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let config = *state.config.rate_limit.read().await;
    let ip = client_ip(request.headers(), addr);

    if !state.rate_limiter.check_at(ip, Instant::now(), config) {
        tracing::warn!(ip = %ip, "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorBody::new("too many requests, slow down")),
        )
            .into_response();
    }

    next.run(request).await
}

/// Resolve the client IP: the first `X-Forwarded-For` entry when the
/// server sits behind a proxy, otherwise the socket peer address.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> IpAddr {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.trim().parse().ok())
        .unwrap_or(peer.ip())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Duration;

    fn config(window_ms: u64, max: u32) -> RateLimitConfig {
        RateLimitConfig {
            window: Duration::from_millis(window_ms),
            max_requests: max,
        }
    }

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn test_allows_up_to_budget_then_blocks() {
        let limiter = RateLimiter::new();
        let now = Instant::now();
        let cfg = config(60_000, 3);

        assert!(limiter.check_at(ip(1), now, cfg));
        assert!(limiter.check_at(ip(1), now, cfg));
        assert!(limiter.check_at(ip(1), now, cfg));
        assert!(!limiter.check_at(ip(1), now, cfg));
        // Unrelated IP is unaffected.
        assert!(limiter.check_at(ip(2), now, cfg));
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        let cfg = config(1_000, 1);

        assert!(limiter.check_at(ip(1), start, cfg));
        assert!(!limiter.check_at(ip(1), start, cfg));
        assert!(limiter.check_at(ip(1), start + Duration::from_millis(1_001), cfg));
    }

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let peer: SocketAddr = "192.168.1.9:4242".parse().unwrap();

        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, peer), peer.ip());

        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers, peer), "203.0.113.7".parse::<IpAddr>().unwrap());

        headers.insert("x-forwarded-for", "not-an-ip".parse().unwrap());
        assert_eq!(client_ip(&headers, peer), peer.ip());
    }
}
