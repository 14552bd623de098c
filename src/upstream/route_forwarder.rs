use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::config::RoutingConfig;
use crate::error::RelayError;
use crate::metrics::{Metrics, MetricsRecorder};
use crate::models::{Coordinate, Token};

/// Forwards a two-waypoint route request to the routing provider's `findRoute` endpoint.
pub struct RouteForwarder {
    config: RoutingConfig,
    url: String,
    client: reqwest::Client,
    metrics: Metrics,
}

impl RouteForwarder {
    pub fn new(config: &RoutingConfig, client: reqwest::Client, metrics: Metrics) -> Self {
        let url = config.find_route_url();
        info!("Creating RouteForwarder for '{}'", url);
        Self {
            config: config.clone(),
            url,
            client,
            metrics,
        }
    }

    /// Requests a route from `start` to `end` and returns the provider's JSON
    /// body unmodified.
    ///
    /// # Errors
    ///
    /// - [`RelayError::RouteProviderStatus`] when the provider answers 4xx/5xx.
    /// - [`RelayError::RouteRequestFailed`] for transport failures, timeouts and
    ///   bodies that are not JSON.
    pub async fn get_route(
        &self,
        start: &Coordinate,
        end: &Coordinate,
        token: &Token,
    ) -> Result<Value, RelayError> {
        let params = [
            ("wp_1", start.to_string()),
            ("wp_2", end.to_string()),
            ("format", self.config.format.clone()),
        ];
        debug!(
            url = self.url.as_str(),
            authorization = "Bearer <redacted>",
            "Forwarding route request with params {:?}",
            params
        );

        let started = Instant::now();
        let result = self.send(&params, token).await;
        let elapsed = started.elapsed().as_secs_f64();

        let (label, status) = match &result {
            Ok(_) => ("success", 200),
            Err(RelayError::RouteProviderStatus(code)) => ("provider_error", *code),
            Err(_) => ("request_failed", 500),
        };
        self.metrics.record_route_request(label, status);
        self.metrics.record_route_duration(elapsed, label);

        result
    }

    async fn send(&self, params: &[(&str, String)], token: &Token) -> Result<Value, RelayError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::AUTHORIZATION, token.bearer())
            .query(params)
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(|e| {
                error!("An error occurred: {}", e);
                RelayError::RouteRequestFailed(e.to_string())
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            error!("HTTP error occurred: {} for url {}", status, self.url);
            return Err(RelayError::RouteProviderStatus(status.as_u16()));
        }
        if !status.is_success() {
            error!("Unexpected status from routing provider: {}", status);
            return Err(RelayError::RouteRequestFailed(format!(
                "unexpected status {}",
                status
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            error!("An error occurred while decoding the route response: {}", e);
            RelayError::RouteRequestFailed(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::io::Write;
    use std::time::Duration;

    fn forwarder(base_url: String) -> RouteForwarder {
        forwarder_with_timeout(base_url, 2000)
    }

    fn forwarder_with_timeout(base_url: String, timeout_in_ms: u64) -> RouteForwarder {
        let config = RoutingConfig {
            base_url,
            timeout_in_ms,
            format: "json".to_string(),
        };
        RouteForwarder::new(
            &config,
            reqwest::Client::new(),
            Metrics::new().expect("metrics should register"),
        )
    }

    fn token() -> Token {
        Token::new("abc123", Utc::now())
    }

    #[tokio::test]
    async fn test_success_passes_body_through() {
        let body = json!({"result": {"trip": {"routes": [{"travelTimeMinutes": 42}]}}});
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/findRoute")
            .match_header("authorization", "Bearer abc123")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("wp_1".into(), "37.7749,-122.4194".into()),
                Matcher::UrlEncoded("wp_2".into(), "37.3382,-121.8863".into()),
                Matcher::UrlEncoded("format".into(), "json".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let result = forwarder(server.url())
            .get_route(
                &Coordinate::new(37.7749, -122.4194),
                &Coordinate::new(37.3382, -121.8863),
                &token(),
            )
            .await;

        m.assert_async().await;
        assert_eq!(result, Ok(body));
    }

    #[tokio::test]
    async fn test_provider_503_is_mirrored() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/findRoute")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let result = forwarder(server.url())
            .get_route(
                &Coordinate::new(37.7749, -122.4194),
                &Coordinate::new(37.3382, -121.8863),
                &token(),
            )
            .await;

        assert_eq!(result, Err(RelayError::RouteProviderStatus(503)));
    }

    #[tokio::test]
    async fn test_non_json_success_is_request_failed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/findRoute")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let result = forwarder(server.url())
            .get_route(
                &Coordinate::new(1.0, 2.0),
                &Coordinate::new(3.0, 4.0),
                &token(),
            )
            .await;

        assert!(matches!(result, Err(RelayError::RouteRequestFailed(_))));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_request_failed() {
        let result = forwarder("http://127.0.0.1:9".to_string())
            .get_route(
                &Coordinate::new(1.0, 2.0),
                &Coordinate::new(3.0, 4.0),
                &token(),
            )
            .await;

        assert!(matches!(result, Err(RelayError::RouteRequestFailed(_))));
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/findRoute")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(500));
                w.write_all(br#"{"result": {}}"#)
            })
            .create_async()
            .await;

        let result = forwarder_with_timeout(server.url(), 50)
            .get_route(
                &Coordinate::new(1.0, 2.0),
                &Coordinate::new(3.0, 4.0),
                &token(),
            )
            .await;

        assert!(matches!(result, Err(RelayError::RouteRequestFailed(_))));
    }
}
