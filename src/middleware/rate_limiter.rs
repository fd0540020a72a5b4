//! Rate limiting middleware
//!
//! Per-client token buckets. Credential endpoints cost more tokens per
//! request than the rest of the API, since each attempt burns a bcrypt
//! verification server-side and is the natural brute-force target.

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{collections::HashMap, sync::Arc, time::Instant};
use tokio::sync::RwLock;

/// Bucket cost charged to endpoints that verify or hash passwords
const CREDENTIAL_COST: f64 = 10.0;

/// Token bucket for rate limiting
#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn new(max_tokens: f64) -> Self {
        Self {
            tokens: max_tokens,
            last_update: Instant::now(),
        }
    }

    fn try_consume(&mut self, cost: f64, tokens_per_second: f64, max_tokens: f64) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        // Refill tokens
        self.tokens = (self.tokens + elapsed * tokens_per_second).min(max_tokens);
        self.last_update = now;

        if self.tokens >= cost {
            self.tokens -= cost;
            true
        } else {
            false
        }
    }
}

/// Rate limiter state
#[derive(Clone)]
pub struct RateLimiter {
    buckets: Arc<RwLock<HashMap<String, TokenBucket>>>,
    tokens_per_second: f64,
    max_tokens: f64,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(requests_per_second: u32) -> Self {
        Self {
            buckets: Arc::new(RwLock::new(HashMap::new())),
            tokens_per_second: requests_per_second as f64,
            max_tokens: (requests_per_second * 2) as f64, // Allow burst of 2x
        }
    }

    /// Check if a request with the given bucket cost is allowed
    pub async fn check(&self, key: &str, cost: f64) -> bool {
        let mut buckets = self.buckets.write().await;

        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::new(self.max_tokens));

        bucket.try_consume(cost, self.tokens_per_second, self.max_tokens)
    }

    /// Cleanup old entries (call periodically)
    pub async fn cleanup(&self, max_age: std::time::Duration) {
        let mut buckets = self.buckets.write().await;
        let now = Instant::now();

        buckets.retain(|_, bucket| now.duration_since(bucket.last_update) < max_age);
    }
}

/// Bucket cost for a request path
fn request_cost(path: &str) -> f64 {
    match path {
        "/auth/" | "/auth/token" | "/users/change_password" => CREDENTIAL_COST,
        _ => 1.0,
    }
}

/// Create rate limiting middleware layer
pub fn rate_limit_layer(
    rate_limiter: RateLimiter,
) -> impl Fn(
    Request<Body>,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
       + Clone
       + Send {
    move |request: Request<Body>, next: Next| {
        let rate_limiter = rate_limiter.clone();
        Box::pin(async move {
            let client_key = extract_client_ip(&request);
            let cost = request_cost(request.uri().path());

            if !rate_limiter.check(&client_key, cost).await {
                tracing::warn!(client = %client_key, "Rate limit exceeded");
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, "1")],
                    "Too many requests. Please try again later.",
                )
                    .into_response();
            }

            next.run(request).await
        })
    }
}

/// Extract client IP from request headers
fn extract_client_ip(request: &Request<Body>) -> String {
    // Try X-Forwarded-For first
    if let Some(forwarded) = request.headers().get("x-forwarded-for") {
        if let Ok(s) = forwarded.to_str() {
            if let Some(ip) = s.split(',').next() {
                return ip.trim().to_string();
            }
        }
    }

    // Try X-Real-IP
    if let Some(real_ip) = request.headers().get("x-real-ip") {
        if let Ok(s) = real_ip.to_str() {
            return s.to_string();
        }
    }

    // Fallback to a default
    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limiter() {
        let limiter = RateLimiter::new(5); // 5 requests per second

        // Should allow first 10 requests (burst capacity = 2x)
        for _ in 0..10 {
            assert!(limiter.check("test-client", 1.0).await);
        }

        // Next request should be denied (bucket empty)
        assert!(!limiter.check("test-client", 1.0).await);
    }

    #[tokio::test]
    async fn test_rate_limiter_different_clients() {
        let limiter = RateLimiter::new(2);

        // Different clients have separate buckets
        assert!(limiter.check("client-a", 1.0).await);
        assert!(limiter.check("client-b", 1.0).await);
        assert!(limiter.check("client-a", 1.0).await);
        assert!(limiter.check("client-b", 1.0).await);
    }

    #[tokio::test]
    async fn test_credential_cost_drains_faster() {
        let limiter = RateLimiter::new(10); // burst capacity 20 tokens

        // Two credential-priced requests fit in the burst, a third does not
        assert!(limiter.check("attacker", CREDENTIAL_COST).await);
        assert!(limiter.check("attacker", CREDENTIAL_COST).await);
        assert!(!limiter.check("attacker", CREDENTIAL_COST).await);

        // Plain requests from another client are unaffected
        assert!(limiter.check("reader", 1.0).await);
    }

    #[test]
    fn test_request_cost_classification() {
        assert_eq!(request_cost("/auth/token"), CREDENTIAL_COST);
        assert_eq!(request_cost("/users/change_password"), CREDENTIAL_COST);
        assert_eq!(request_cost("/todos/"), 1.0);
        assert_eq!(request_cost("/health"), 1.0);
    }
}
