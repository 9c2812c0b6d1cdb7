//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Dispatcher (dispatches, per-step outcomes, queue rejections)
//! - Renderer (document sizes)
//! - External services (ticketing API, SMTP)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Dispatcher Metrics
// =============================================================================

/// Dispatches total by generation mode.
pub static DISPATCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("ticketpress_dispatches_total", "Total dispatched jobs"),
        &["mode"], // "ticket", "ticket_and_notify"
    )
    .unwrap()
});

/// Per-step outcomes across all dispatches.
pub static DISPATCH_STEPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("ticketpress_dispatch_steps_total", "Total dispatch steps"),
        &["step", "result"], // result: "success", "failed"
    )
    .unwrap()
});

/// Dispatch duration in seconds.
pub static DISPATCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "ticketpress_dispatch_duration_seconds",
            "Duration of a full dispatch",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["mode"],
    )
    .unwrap()
});

/// Webhook deliveries rejected because the dispatch queue was full.
pub static QUEUE_REJECTIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "ticketpress_queue_rejections_total",
        "Total dispatches rejected due to a full queue",
    )
    .unwrap()
});

// =============================================================================
// Renderer Metrics
// =============================================================================

/// Size distribution of rendered documents.
pub static DOCUMENT_BYTES: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "ticketpress_document_bytes",
            "Size of rendered documents in bytes",
        )
        .buckets(vec![
            1024.0, 4096.0, 16384.0, 65536.0, 262144.0, 1048576.0,
        ]),
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "ticketpress_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "status"], // status: "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(DISPATCHES_TOTAL.clone()),
        Box::new(DISPATCH_STEPS.clone()),
        Box::new(DISPATCH_DURATION.clone()),
        Box::new(QUEUE_REJECTIONS.clone()),
        Box::new(DOCUMENT_BYTES.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
    ]
}
