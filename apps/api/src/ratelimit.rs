use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

/// Fixed-window API rate limit: 200 requests per 15 minutes per client.
pub const WINDOW: Duration = Duration::from_secs(15 * 60);
pub const MAX_REQUESTS: u32 = 200;

#[derive(Debug)]
struct Window {
    opened: Instant,
    count: u32,
}

/// Per-client request counters. Windows reset lazily: an entry whose window
/// has elapsed starts over on the next request from that client.
#[derive(Debug, Default)]
pub struct RateLimits {
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimits {
    /// Records one request from `client` and reports whether it is admitted.
    pub fn admit(&self, client: IpAddr, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let window = windows.entry(client).or_insert(Window {
            opened: now,
            count: 0,
        });

        if now.duration_since(window.opened) >= WINDOW {
            window.opened = now;
            window.count = 0;
        }

        window.count += 1;
        window.count <= MAX_REQUESTS
    }
}

/// Middleware applied to all `/api` routes.
pub async fn enforce(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_ip(request.headers(), peer.map(|ConnectInfo(addr)| addr));

    if state.rate_limits.admit(client, Instant::now()) {
        next.run(request).await
    } else {
        warn!(%client, "rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests" })),
        )
            .into_response()
    }
}

/// Client identity: the first X-Forwarded-For hop when present (deployments
/// behind a proxy), otherwise the socket peer address.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> IpAddr {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|value| value.trim().parse().ok())
        .or(peer.map(|addr| addr.ip()))
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7));

    #[test]
    fn admits_up_to_the_cap_then_rejects() {
        let limits = RateLimits::default();
        let now = Instant::now();

        for _ in 0..MAX_REQUESTS {
            assert!(limits.admit(CLIENT, now));
        }
        assert!(!limits.admit(CLIENT, now));
    }

    #[test]
    fn window_resets_after_it_elapses() {
        let limits = RateLimits::default();
        let now = Instant::now();

        for _ in 0..=MAX_REQUESTS {
            limits.admit(CLIENT, now);
        }
        assert!(!limits.admit(CLIENT, now));

        assert!(limits.admit(CLIENT, now + WINDOW));
    }

    #[test]
    fn clients_are_counted_independently() {
        let limits = RateLimits::default();
        let now = Instant::now();
        let other = IpAddr::V4(Ipv4Addr::new(198, 51, 100, 1));

        for _ in 0..=MAX_REQUESTS {
            limits.admit(CLIENT, now);
        }
        assert!(!limits.admit(CLIENT, now));
        assert!(limits.admit(other, now));
    }

    #[test]
    fn forwarded_header_takes_precedence_over_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        let peer: SocketAddr = "127.0.0.1:4444".parse().unwrap();

        assert_eq!(
            client_ip(&headers, Some(peer)),
            "203.0.113.9".parse::<IpAddr>().unwrap()
        );
        assert_eq!(client_ip(&HeaderMap::new(), Some(peer)), peer.ip());
        assert_eq!(
            client_ip(&HeaderMap::new(), None),
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        );
    }
}
