//! Lookup span helpers.

use crate::lookup::LookupError;
use crate::model::Identifier;
use crate::telemetry::metrics;
use tracing::Span;

/// Start a span for one username lookup.
///
/// `lookup.outcome` is declared empty and filled by [`record_lookup_outcome`].
pub fn start_lookup_span(username: &str) -> Span {
    tracing::info_span!(
        "lookup.resolve",
        "lookup.username" = username,
        "lookup.outcome" = tracing::field::Empty,
        "lookup.duration_ms" = tracing::field::Empty,
    )
}

/// Record how a lookup ended on its span and in the duration histogram.
pub fn record_lookup_outcome(
    span: &Span,
    outcome: &Result<Identifier, LookupError>,
    duration_ms: u64,
) {
    let label = match outcome {
        Ok(_) => "resolved",
        Err(e) => e.kind(),
    };
    span.record("lookup.outcome", label);
    span.record("lookup.duration_ms", duration_ms);

    metrics::lookup_duration_ms().record(
        duration_ms as f64,
        &[opentelemetry::KeyValue::new("result", label)],
    );

    span.in_scope(|| match outcome {
        Ok(id) => tracing::debug!(%id, duration_ms, "lookup resolved"),
        Err(e) => tracing::debug!(error = %e, duration_ms, "lookup failed"),
    });
}
