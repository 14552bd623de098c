//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Trait for recording relay metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records a call to the token service with its outcome.
    fn record_token_fetch(&self, result: &str);

    /// Records whether a token request was served from the cache.
    fn record_token_cache(&self, result: &str);

    /// Records a call to the routing provider with its outcome and returned status.
    fn record_route_request(&self, result: &str, status: u16);

    /// Records the duration of a call to the routing provider.
    fn record_route_duration(&self, duration_secs: f64, result: &str);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    token_fetches_total: CounterVec,
    token_cache_total: CounterVec,

    route_requests_total: CounterVec,
    route_duration_seconds: HistogramVec,
}

impl Metrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Arc::new(Registry::new());

        let token_fetches_total = register_counter_vec_with_registry!(
            Opts::new(
                "token_fetches_total",
                "Total number of calls to the token service"
            ),
            &["result"],
            registry.clone()
        )?;

        let token_cache_total = register_counter_vec_with_registry!(
            Opts::new(
                "token_cache_total",
                "Token lookups, labelled by cache hit or miss"
            ),
            &["result"],
            registry.clone()
        )?;

        let route_requests_total = register_counter_vec_with_registry!(
            Opts::new(
                "route_requests_total",
                "Total number of calls to the routing provider"
            ),
            &["result", "status"],
            registry.clone()
        )?;

        let route_duration_seconds = register_histogram_vec_with_registry!(
            "route_duration_seconds",
            "Routing provider request duration in seconds",
            &["result"],
            vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
            registry.clone()
        )?;

        Ok(Metrics {
            registry,
            token_fetches_total,
            token_cache_total,
            route_requests_total,
            route_duration_seconds,
        })
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl MetricsRecorder for Metrics {
    fn record_token_fetch(&self, result: &str) {
        self.token_fetches_total.with_label_values(&[result]).inc();
    }

    fn record_token_cache(&self, result: &str) {
        self.token_cache_total.with_label_values(&[result]).inc();
    }

    fn record_route_request(&self, result: &str, status: u16) {
        let status = status.to_string();
        self.route_requests_total
            .with_label_values(&[result, status.as_str()])
            .inc();
    }

    fn record_route_duration(&self, duration_secs: f64, result: &str) {
        self.route_duration_seconds
            .with_label_values(&[result])
            .observe(duration_secs);
    }
}
