//! Metric instrument factories for convert-uuid.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! Without an OTLP endpoint the global provider is a no-op.

use opentelemetry::metrics::{Counter, Histogram, Meter};

fn meter() -> Meter {
    opentelemetry::global::meter("convert-uuid")
}

/// Counter: lookups reaped by the dispatcher.
/// Labels: `result` ("resolved" | "not_found" | "rejected" | "malformed" | "transient").
pub fn lookups_completed() -> Counter<u64> {
    meter()
        .u64_counter("convertuuid.lookups.completed")
        .with_description("Number of username lookups completed")
        .build()
}

/// Histogram: single lookup duration in milliseconds.
/// Labels: `result`.
pub fn lookup_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("convertuuid.lookup.duration_ms")
        .with_description("Username lookup duration in milliseconds")
        .with_unit("ms")
        .build()
}

/// Counter: progress reports emitted by the dispatcher loop.
pub fn progress_reports() -> Counter<u64> {
    meter()
        .u64_counter("convertuuid.progress.reports")
        .with_description("Number of progress reports emitted")
        .build()
}
