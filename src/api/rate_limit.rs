use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Expired client entries are swept once the map grows past this, so one-off
/// clients cannot grow it without bound.
const EVICT_THRESHOLD: usize = 1024;

/// Fixed-window request counter per client IP. Each route group gets its own
/// limiter with its own quota; counters reset when the window rolls over.
#[derive(Clone)]
pub struct FixedWindow {
    max_requests: u32,
    window: Duration,
    hits: Arc<Mutex<HashMap<String, (Instant, u32)>>>,
}

impl FixedWindow {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn check(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut hits = self.hits.lock().expect("rate limiter lock poisoned");

        if hits.len() >= EVICT_THRESHOLD {
            let window = self.window;
            hits.retain(|_, (start, _)| now.duration_since(*start) < window);
        }

        let entry = hits.entry(client.to_string()).or_insert((now, 0));
        if now.duration_since(entry.0) >= self.window {
            *entry = (now, 0);
        }
        entry.1 += 1;
        entry.1 <= self.max_requests
    }
}

/// Proxy headers first, then the peer socket address so direct clients do not
/// all share a single bucket.
fn client_ip(request: &Request) -> String {
    if let Some(ip) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| {
            request
                .headers()
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
        })
    {
        return ip.trim().to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn limit(
    State(limiter): State<FixedWindow>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_ip(&request);
    if !limiter.check(&client) {
        metrics::counter!("shelterd_rate_limited_total").increment(1);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "type": "about:blank",
                "title": "Too Many Requests",
                "status": 429,
            })),
        )
            .into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_is_enforced_per_window_and_client() {
        let limiter = FixedWindow::new(2, Duration::from_secs(60));

        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        // A different client has its own counter.
        assert!(limiter.check("10.0.0.2"));
    }

    #[test]
    fn counter_resets_after_the_window() {
        let limiter = FixedWindow::new(1, Duration::from_millis(10));

        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        std::thread::sleep(Duration::from_millis(15));
        assert!(limiter.check("10.0.0.1"));
    }

    #[test]
    fn stale_clients_are_evicted_once_the_map_fills_up() {
        let limiter = FixedWindow::new(1, Duration::from_millis(5));

        for i in 0..EVICT_THRESHOLD {
            limiter.check(&format!("10.0.{}.{}", i / 256, i % 256));
        }
        std::thread::sleep(Duration::from_millis(10));

        assert!(limiter.check("10.1.0.1"));
        let hits = limiter.hits.lock().unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn direct_clients_are_keyed_by_peer_address() {
        let mut request = Request::new(axum::body::Body::empty());
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 7], 51234))));
        assert_eq!(client_ip(&request), "192.168.1.7");

        // Proxy headers still win when present.
        request
            .headers_mut()
            .insert("x-forwarded-for", "203.0.113.9".parse().unwrap());
        assert_eq!(client_ip(&request), "203.0.113.9");
    }
}
