//! HTTP client with automatic rate limiting and retry logic
//!
//! Shared by platform adapters so each one gets header-aware retries and a
//! local request budget without duplicating the plumbing.

use super::retry_policy::{is_retryable_error, RateLimitInfo, RetryPolicy};
use crate::shared::errors::{AppError, AppResult};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use reqwest::{Client, Response};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;

type DirectRateLimiter = GovernorRateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

/// HTTP client that handles rate limiting and retries for one platform
pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectRateLimiter,
    retry_policy: RetryPolicy,
    platform_name: String,
}

impl RateLimitClient {
    /// Create a new client for Shopify storefront catalogs
    pub fn for_shopify() -> Self {
        Self::new(
            "Shopify",
            RetryPolicy::shopify(),
            // Storefront bucket: 2 req/sec sustained with a burst of 4
            Self::create_rate_limiter(2.0, 4),
        )
    }

    /// Create a rate limiter with specified requests per second and burst capacity
    fn create_rate_limiter(requests_per_second: f64, burst_size: u32) -> DirectRateLimiter {
        let period = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::MAX
        };

        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(NonZeroU32::new(burst_size.max(1)).unwrap_or(NonZeroU32::MIN));

        GovernorRateLimiter::direct(quota)
    }

    /// Create a custom client
    pub fn new(platform_name: &str, retry_policy: RetryPolicy, rate_limiter: DirectRateLimiter) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("storesync/0.1")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            rate_limiter,
            retry_policy,
            platform_name: platform_name.to_string(),
        }
    }

    /// Make a GET request with rate limiting and retries
    pub async fn get<T>(&self, url: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.retry_policy.max_retries {
            // Wait for the local request budget before attempting
            self.rate_limiter.until_ready().await;

            match self.client.get(url).send().await {
                Ok(response) => {
                    // Remote rate limiting
                    if response.status() == 429 {
                        let rate_limit_info = RateLimitInfo::from_headers(response.headers());

                        if attempt < self.retry_policy.max_retries {
                            let delay = self.calculate_retry_delay(attempt, &rate_limit_info);
                            log::warn!(
                                "{} rate limited (attempt {}/{}). Waiting {:?} before retry.",
                                self.platform_name,
                                attempt + 1,
                                self.retry_policy.max_retries + 1,
                                delay
                            );
                            sleep(delay).await;
                            continue;
                        } else {
                            return Err(AppError::RateLimited(format!(
                                "{} rate limit still exceeded after {} attempts",
                                self.platform_name,
                                self.retry_policy.max_retries + 1
                            )));
                        }
                    }

                    if !response.status().is_success() {
                        let error = AppError::RemoteFetch(format!(
                            "{} returned status {}",
                            self.platform_name,
                            response.status()
                        ));

                        // Only retry server errors
                        if response.status().is_server_error()
                            && attempt < self.retry_policy.max_retries
                        {
                            let delay = self.retry_policy.calculate_delay(attempt, None);
                            log::warn!(
                                "{} (attempt {}/{}). Retrying in {:?}",
                                error,
                                attempt + 1,
                                self.retry_policy.max_retries + 1,
                                delay
                            );
                            sleep(delay).await;
                            last_error = Some(error);
                            continue;
                        } else {
                            return Err(error);
                        }
                    }

                    return self.parse_response(response).await;
                }
                Err(e) => {
                    let retryable = is_retryable_error(&e);
                    let error = AppError::from(e);

                    if retryable && attempt < self.retry_policy.max_retries {
                        let delay = self.retry_policy.calculate_delay(attempt, None);
                        log::warn!(
                            "{} request failed (attempt {}/{}): {}. Retrying in {:?}",
                            self.platform_name,
                            attempt + 1,
                            self.retry_policy.max_retries + 1,
                            error,
                            delay
                        );
                        sleep(delay).await;
                        last_error = Some(error);
                        continue;
                    }
                    return Err(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::RemoteFetch(format!(
                "{} request failed after {} attempts",
                self.platform_name,
                self.retry_policy.max_retries + 1
            ))
        }))
    }

    /// Parse the response body into the expected shape
    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = response.text().await.map_err(|e| {
            AppError::RemoteFetch(format!(
                "Failed to read {} response: {}",
                self.platform_name, e
            ))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            AppError::RemoteFetch(format!(
                "Malformed {} response: {}. Body: {}",
                self.platform_name,
                e,
                if body.len() > 200 {
                    format!("{}...", &body[..200])
                } else {
                    body
                }
            ))
        })
    }

    /// Calculate delay for retry based on rate limit info and policy
    fn calculate_retry_delay(&self, attempt: u32, rate_limit_info: &RateLimitInfo) -> Duration {
        if let Some(server_delay) = rate_limit_info.recommended_delay() {
            return server_delay.min(self.retry_policy.max_delay);
        }
        self.retry_policy.calculate_delay(attempt, None)
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    /// Get platform name
    pub fn platform_name(&self) -> &str {
        &self.platform_name
    }
}
