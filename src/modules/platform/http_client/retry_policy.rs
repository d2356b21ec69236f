//! Retry policies for remote commerce platforms
//!
//! Handles platform-specific rate limiting with retry logic driven by HTTP
//! headers and platform characteristics.

use std::time::Duration;

/// Configuration for HTTP retry behavior
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base delay between retries (will be adjusted based on headers)
    pub base_delay: Duration,
    /// Maximum delay to wait (prevents excessive waits)
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Whether to add jitter on top of the computed delay
    pub jitter: bool,
}

impl RetryPolicy {
    /// Policy for Shopify storefront catalogs (2 req/sec bucket)
    pub fn shopify() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// Calculate delay for next retry attempt
    pub fn calculate_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        // If the server provided a Retry-After header, respect it
        if let Some(server_delay) = retry_after {
            return server_delay.min(self.max_delay);
        }

        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let mut delay =
            Duration::from_millis((self.base_delay.as_millis() as f64 * multiplier) as u64);

        if delay > self.max_delay {
            delay = self.max_delay;
        }

        if self.jitter {
            // 10% jitter to prevent thundering herd
            let jitter_ms = (delay.as_millis() as f64 * 0.1 * rand::random::<f64>()) as u64;
            delay = Duration::from_millis(delay.as_millis() as u64 + jitter_ms);
        }

        delay
    }
}

/// Information extracted from HTTP 429 responses
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// How long to wait before next request (from Retry-After header)
    pub retry_after: Option<Duration>,
    /// Number of requests remaining (from X-RateLimit-Remaining header)
    pub remaining: Option<u32>,
    /// Total rate limit (from X-RateLimit-Limit header)
    pub limit: Option<u32>,
}

impl RateLimitInfo {
    /// Parse rate limit information from HTTP response headers
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let retry_after = headers
            .get("retry-after")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<f64>().ok())
            .map(Duration::from_secs_f64);

        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        let limit = headers
            .get("x-ratelimit-limit")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        Self {
            retry_after,
            remaining,
            limit,
        }
    }

    pub fn recommended_delay(&self) -> Option<Duration> {
        self.retry_after
    }
}

/// Determines if a transport-level error is retryable
pub fn is_retryable_error(error: &reqwest::Error) -> bool {
    if let Some(status) = error.status() {
        match status.as_u16() {
            // Rate limiting
            429 => true,
            // Server errors (potentially temporary)
            500..=599 => true,
            // Timeout-related
            408 => true,
            _ => false,
        }
    } else {
        // Network errors are potentially retryable
        error.is_timeout() || error.is_connect()
    }
}
