/// Metrics and telemetry for clipshelf
///
/// Prometheus-compatible metrics for the thumbnail pipeline:
/// - upload and serve counts by outcome
/// - bytes written to the blob store
/// - HTTP request latencies

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder,
    HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};

lazy_static! {
    /// Thumbnail uploads by outcome
    pub static ref THUMBNAIL_UPLOADS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "thumbnail_uploads_total",
        "Total number of thumbnail upload requests",
        &["outcome"]
    )
    .unwrap();

    /// Thumbnails served by outcome
    pub static ref THUMBNAIL_SERVES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "thumbnail_serves_total",
        "Total number of thumbnail serve requests",
        &["outcome"]
    )
    .unwrap();

    /// Bytes accepted into the blob store
    pub static ref THUMBNAIL_BYTES_STORED: IntCounter = register_int_counter!(
        "thumbnail_bytes_stored_total",
        "Total thumbnail bytes written to the blob store"
    )
    .unwrap();

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request latencies in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .unwrap();
}

/// Record a completed thumbnail upload
pub fn record_upload(outcome: &str) {
    THUMBNAIL_UPLOADS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Record a thumbnail serve
pub fn record_serve(outcome: &str) {
    THUMBNAIL_SERVES_TOTAL.with_label_values(&[outcome]).inc();
}

/// Record bytes written to the blob store
pub fn record_bytes_stored(bytes: usize) {
    THUMBNAIL_BYTES_STORED.inc_by(bytes as u64);
}

/// Render metrics in Prometheus text format
pub fn render_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}
