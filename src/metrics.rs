//! Prometheus metrics for the status surface.
//!
//! This module provides metrics for:
//! - Requests served per route and format
//! - Render latency
//! - Render and upstream failures

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use tracing::{debug, info};

// === Metric Name Constants ===

/// Requests served counter metric name.
pub const METRIC_REQUESTS: &str = "status_requests_total";
/// Render latency metric name.
pub const METRIC_RENDER_LATENCY: &str = "status_render_latency_ms";
/// Render failures counter metric name.
pub const METRIC_RENDER_FAILURES: &str = "status_render_failures_total";
/// Upstream failures counter metric name.
pub const METRIC_UPSTREAM_FAILURES: &str = "status_upstream_failures_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_REQUESTS, "Total number of status requests served");
    describe_histogram!(
        METRIC_RENDER_LATENCY,
        "Time to assemble and render a status response in milliseconds"
    );
    describe_counter!(
        METRIC_RENDER_FAILURES,
        "Total number of responses that failed to render"
    );
    describe_counter!(
        METRIC_UPSTREAM_FAILURES,
        "Total number of failed membership or registry snapshots"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus exporter with its own HTTP listener.
pub fn install_exporter(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

/// Increment the request counter.
pub fn inc_requests(route: &'static str, format: &str) {
    counter!(METRIC_REQUESTS, "route" => route, "format" => format.to_string()).increment(1);
}

/// Increment the render failure counter.
pub fn inc_render_failures(format: &str) {
    counter!(METRIC_RENDER_FAILURES, "format" => format.to_string()).increment(1);
}

/// Increment the upstream failure counter.
pub fn inc_upstream_failures(source: &'static str) {
    counter!(METRIC_UPSTREAM_FAILURES, "source" => source).increment(1);
}

/// RAII guard for timing renders.
/// Records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    format: String,
}

impl LatencyTimer {
    /// Start timing a render in the given format.
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            format: format.into(),
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        histogram!(METRIC_RENDER_LATENCY, "format" => self.format.clone()).record(latency_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = LatencyTimer::new("json");
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0); // Allow some tolerance
    }
}
