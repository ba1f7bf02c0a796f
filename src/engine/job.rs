//! A single lookup job: one username, one call to the lookup client.

use crate::lookup::{LookupError, ProfileLookup};
use crate::model::Identifier;
use crate::telemetry::lookup::{record_lookup_outcome, start_lookup_span};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// A finished lookup, handed back to the dispatcher when its task completes.
///
/// A job is in flight for exactly as long as its task is running; the
/// task finishing is the completion signal.
#[derive(Debug)]
pub struct LookupJob {
    pub username: String,
    pub outcome: Result<Identifier, LookupError>,
    pub duration_ms: u64,
}

impl LookupJob {
    /// Resolve `username` inside a `lookup.resolve` span.
    pub async fn run<L>(lookup: Arc<L>, username: String) -> Self
    where
        L: ProfileLookup + ?Sized,
    {
        let span = start_lookup_span(&username);
        let start = Instant::now();

        let outcome = lookup.resolve(&username).instrument(span.clone()).await;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        record_lookup_outcome(&span, &outcome, duration_ms);

        Self {
            username,
            outcome,
            duration_ms,
        }
    }
}
