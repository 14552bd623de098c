use cached::{Cached, TimedCache};
use chrono::Utc;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::TokenServiceConfig;
use crate::error::RelayError;
use crate::metrics::{Metrics, MetricsRecorder};
use crate::models::Token;
use crate::utils::log_throttle::LogThrottle;

const CACHE_HIT_LOG_WINDOW: Duration = Duration::from_secs(30);

/// Fetches the bearer token from the token service and keeps it for `ttl_in_seconds`.
///
/// Only successful fetches are cached. The mutex is never held across the
/// outbound call, so two requests racing on an empty cache may both reach the
/// token service; whichever finishes last overwrites the entry.
pub struct TokenProvider {
    config: TokenServiceConfig,
    client: reqwest::Client,
    cache: Mutex<TimedCache<(), Token>>,
    metrics: Metrics,
    log_throttle: LogThrottle,
}

impl TokenProvider {
    pub fn new(config: &TokenServiceConfig, client: reqwest::Client, metrics: Metrics) -> Self {
        info!(
            "Creating TokenProvider for '{}' with a {}s token ttl",
            config.url, config.ttl_in_seconds
        );
        Self {
            config: config.clone(),
            client,
            cache: Mutex::new(TimedCache::with_lifespan(config.ttl_in_seconds)),
            metrics,
            log_throttle: LogThrottle::new(CACHE_HIT_LOG_WINDOW),
        }
    }

    /// Returns the cached token, fetching a new one when none is live.
    pub async fn get_token(&self) -> Result<Token, RelayError> {
        if let Some(token) = self.cached() {
            self.metrics.record_token_cache("hit");
            if let Some(suppressed_count) = self.log_throttle.should_emit("tokens.cache.hit") {
                debug!(
                    event_name = "tokens.cache.hit",
                    event_domain = "tokens",
                    token_age_seconds = (Utc::now() - token.fetched_at).num_seconds(),
                    cache_ttl_seconds = self.config.ttl_in_seconds,
                    suppressed_count,
                    "token served from cache"
                );
            }
            return Ok(token);
        }

        self.metrics.record_token_cache("miss");
        let token = self.fetch().await?;
        self.lock_cache().cache_set((), token.clone());
        Ok(token)
    }

    /// Drops the cached token so the next `get_token` contacts the token service.
    /// Returns whether an entry was present.
    pub fn invalidate(&self) -> bool {
        let removed = self.lock_cache().cache_remove(&()).is_some();
        info!(
            event_name = "tokens.cache.invalidated",
            event_domain = "tokens",
            removed,
            "token cache invalidated"
        );
        removed
    }

    fn cached(&self) -> Option<Token> {
        self.lock_cache().cache_get(&()).cloned()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, TimedCache<(), Token>> {
        self.cache.lock().expect("token cache mutex poisoned")
    }

    async fn fetch(&self) -> Result<Token, RelayError> {
        debug!("Requesting token from '{}'", self.config.url);

        let response = self
            .client
            .get(&self.config.url)
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(|e| {
                error!("Request to token service failed: {}", e);
                self.metrics.record_token_fetch("request_failed");
                RelayError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Error fetching token: {}", status.as_u16());
            self.metrics.record_token_fetch("upstream_status");
            return Err(RelayError::UpstreamStatus(status.as_u16()));
        }

        let body = response.json::<Value>().await.map_err(|e| {
            error!("Failed to read token service response: {}", e);
            self.metrics.record_token_fetch("request_failed");
            RelayError::RequestFailed(e.to_string())
        })?;

        let Some(token) = body
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
        else {
            error!("Token not found in response");
            self.metrics.record_token_fetch("token_missing");
            return Err(RelayError::TokenMissing);
        };

        debug!(
            event_name = "tokens.fetch.success",
            event_domain = "tokens",
            "Received token from token service"
        );
        self.metrics.record_token_fetch("success");
        Ok(Token::new(token, Utc::now()))
    }
}
