//! Metrics collection and exposition.
//!
//! # Metrics
//! - `prerender_requests_total` (counter): requests by outcome
//!   (`rendered`, `asset`, `fallback`)
//! - `prerender_request_duration_seconds` (histogram): latency by outcome
//! - `prerender_render_failures_total` (counter): failed handler executions
//! - `prerender_cached_routes` (gauge): entries in the render cache
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until an
//!   exporter is installed
//! - The Prometheus exporter is optional and serves its own listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one served request.
pub fn record_request(outcome: &'static str, start: Instant) {
    ::metrics::counter!("prerender_requests_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("prerender_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_render_failure() {
    ::metrics::counter!("prerender_render_failures_total").increment(1);
}

pub fn record_cached_routes(count: usize) {
    ::metrics::gauge!("prerender_cached_routes").set(count as f64);
}
