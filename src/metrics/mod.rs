//! Metrics collection and exposition for Prometheus.
//!
//! This module provides centralized metrics recording for the upstream calls.

mod recorder;

pub use recorder::{Metrics, MetricsRecorder};
