//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with SLO-aligned histograms
//! and standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Symposia metrics
pub const METRICS_PREFIX: &str = "symposia";

/// SLO-aligned histogram buckets for request latency (in seconds)
/// Targets: P50 < 50ms, P99 < 150ms
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms - P50 target
    0.075,  // 75ms
    0.100,  // 100ms
    0.150,  // 150ms - P99 target
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
    10.00,  // 10s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Submission workflow metrics
    describe_counter!(
        format!("{}_papers_submitted_total", METRICS_PREFIX),
        Unit::Count,
        "Total paper submissions accepted"
    );

    describe_counter!(
        format!("{}_paper_status_updates_total", METRICS_PREFIX),
        Unit::Count,
        "Total paper status field updates"
    );

    describe_counter!(
        format!("{}_full_text_uploads_total", METRICS_PREFIX),
        Unit::Count,
        "Total full-text upload attempts"
    );

    describe_counter!(
        format!("{}_blob_release_failures_total", METRICS_PREFIX),
        Unit::Count,
        "Blob deletions that failed and were skipped"
    );

    // Attendee metrics
    describe_counter!(
        format!("{}_registrations_total", METRICS_PREFIX),
        Unit::Count,
        "Total attendee registrations accepted"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Record an accepted paper submission
pub fn record_paper_submitted(topic: i32) {
    counter!(
        format!("{}_papers_submitted_total", METRICS_PREFIX),
        "topic" => topic.to_string()
    )
    .increment(1);
}

/// Record a paper status change, labeled by which status field moved
pub fn record_status_update(field: &str) {
    counter!(
        format!("{}_paper_status_updates_total", METRICS_PREFIX),
        "field" => field.to_string()
    )
    .increment(1);
}

/// Record a full-text upload attempt
pub fn record_full_text_upload(outcome: &str) {
    counter!(
        format!("{}_full_text_uploads_total", METRICS_PREFIX),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record a blob release that failed and was skipped
pub fn record_blob_release_failure() {
    counter!(format!("{}_blob_release_failures_total", METRICS_PREFIX)).increment(1);
}

/// Record an accepted attendee registration
pub fn record_registration() {
    counter!(format!("{}_registrations_total", METRICS_PREFIX)).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets() {
        // Verify buckets are sorted and contain SLO targets
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }

        // P50 target (50ms) should be in buckets
        assert!(LATENCY_BUCKETS.contains(&0.050));
        // P99 target (150ms) should be in buckets
        assert!(LATENCY_BUCKETS.contains(&0.150));
    }

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("GET", "/api/papers");
        std::thread::sleep(std::time::Duration::from_millis(10));
        metrics.finish(200);
        // Just verify it runs without panic
    }

    #[test]
    fn test_domain_recorders() {
        record_paper_submitted(2);
        record_status_update("reviewStatus");
        record_full_text_upload("accepted");
        record_blob_release_failure();
        record_registration();
    }
}
