//! Dispatcher: keeps up to `max_concurrency` lookups in flight until the
//! pending queue and the in-flight set are both empty.

use crate::error::{Error, Result};
use crate::lookup::{LookupError, ProfileLookup};
use crate::output;
use crate::store::ResultStore;
use crate::telemetry::metrics;
use opentelemetry::KeyValue;
use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::{self, JoinError, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use super::job::LookupJob;

/// Configuration for the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Upper bound on simultaneously running lookups. Must be at least 1.
    pub max_concurrency: usize,
    /// Minimum time between progress reports.
    pub progress_interval: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            progress_interval: Duration::from_millis(1000),
        }
    }
}

impl DispatcherConfig {
    pub fn with_max_concurrency(max_concurrency: usize) -> Self {
        Self {
            max_concurrency,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency < 1 {
            return Err(Error::Config(format!(
                "max concurrency must be at least 1, got {}",
                self.max_concurrency
            )));
        }
        if self.progress_interval.is_zero() {
            return Err(Error::Config(
                "progress interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// A username that produced no entry in the result store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub username: String,
    pub reason: LookupError,
}

/// Summary of one dispatcher run.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Jobs started; one per input username.
    pub spawned: usize,
    pub resolved: usize,
    pub unresolved: Vec<Unresolved>,
    /// Largest in-flight set observed.
    pub peak_inflight: usize,
    /// Progress lines emitted while the loop ran.
    pub progress_reports: usize,
    pub elapsed: Duration,
}

impl DispatchReport {
    pub fn completed(&self) -> usize {
        self.resolved + self.unresolved.len()
    }
}

/// What woke the control loop.
enum Wake {
    Joined(std::result::Result<(task::Id, LookupJob), JoinError>),
    Progress,
}

/// Drives a username list to completion within a concurrency bound.
pub struct Dispatcher<L: ?Sized> {
    lookup: Arc<L>,
    store: ResultStore,
    config: DispatcherConfig,
}

impl<L> Dispatcher<L>
where
    L: ProfileLookup + ?Sized + 'static,
{
    /// Build a dispatcher writing into `store`. Rejects invalid config.
    pub fn new(lookup: Arc<L>, store: ResultStore, config: DispatcherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            lookup,
            store,
            config,
        })
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Run every username through the lookup client.
    ///
    /// Lookup failures never abort the run: they are logged, counted, and
    /// returned in [`DispatchReport::unresolved`]. The only error is an
    /// empty username list.
    pub async fn run(&self, usernames: Vec<String>) -> Result<DispatchReport> {
        if usernames.is_empty() {
            return Err(Error::Config("no usernames to convert".to_string()));
        }

        let start = Instant::now();
        let mut pending: VecDeque<String> = usernames.into();
        let mut inflight: HashMap<task::Id, String> = HashMap::new();
        let mut jobs: JoinSet<LookupJob> = JoinSet::new();
        let mut report = DispatchReport::default();

        let interval = self.config.progress_interval;
        let mut progress = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        progress.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            usernames = pending.len(),
            max_concurrency = self.config.max_concurrency,
            "dispatcher started"
        );

        loop {
            // Fill every free slot in one burst
            while jobs.len() < self.config.max_concurrency {
                let Some(username) = pending.pop_front() else {
                    break;
                };
                let handle = jobs.spawn(LookupJob::run(Arc::clone(&self.lookup), username.clone()));
                inflight.insert(handle.id(), username);
                report.spawned += 1;
            }
            report.peak_inflight = report.peak_inflight.max(jobs.len());

            // Fill leaves jobs empty only once pending is drained too
            if jobs.is_empty() {
                break;
            }

            let wake = tokio::select! {
                Some(joined) = jobs.join_next_with_id() => Wake::Joined(joined),
                _ = progress.tick() => Wake::Progress,
            };

            match wake {
                Wake::Joined(joined) => self.reap(joined, &mut inflight, &mut report),
                Wake::Progress => {
                    metrics::progress_reports().add(1, &[]);
                    report.progress_reports += 1;
                    info!(
                        completed = report.completed(),
                        inflight = jobs.len(),
                        pending = pending.len(),
                        "progress"
                    );
                }
            }
        }

        report.elapsed = start.elapsed();
        info!(
            resolved = report.resolved,
            unresolved = report.unresolved.len(),
            elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
            "dispatcher finished"
        );
        Ok(report)
    }

    /// Move one finished job out of the in-flight set and record its outcome.
    fn reap(
        &self,
        joined: std::result::Result<(task::Id, LookupJob), JoinError>,
        inflight: &mut HashMap<task::Id, String>,
        report: &mut DispatchReport,
    ) {
        let (username, outcome) = match joined {
            Ok((id, job)) => {
                inflight.remove(&id);
                (job.username, job.outcome)
            }
            Err(join_error) => {
                let Some(username) = inflight.remove(&join_error.id()) else {
                    error!(error = %join_error, "lookup task ended with no in-flight entry");
                    return;
                };
                let reason = LookupError::Transient(format!("lookup task failed: {join_error}"));
                (username, Err(reason))
            }
        };

        match outcome {
            Ok(id) => {
                metrics::lookups_completed().add(1, &[KeyValue::new("result", "resolved")]);
                self.store.insert(username, id);
                report.resolved += 1;
            }
            Err(reason) => {
                metrics::lookups_completed().add(1, &[KeyValue::new("result", reason.kind())]);
                warn!(
                    %username,
                    reason = %reason,
                    permanent = reason.is_permanent(),
                    "lookup failed, skipping username"
                );
                report.unresolved.push(Unresolved { username, reason });
            }
        }
    }
}

/// Resolve `usernames` into `store`, then write the store to `sink`.
///
/// A sink failure is returned as [`Error::Output`]; the resolved entries
/// remain in `store` for the caller.
pub async fn convert<L, W>(
    lookup: Arc<L>,
    store: &ResultStore,
    usernames: Vec<String>,
    config: DispatcherConfig,
    sink: W,
) -> Result<DispatchReport>
where
    L: ProfileLookup + ?Sized + 'static,
    W: Write,
{
    let dispatcher = Dispatcher::new(lookup, store.clone(), config)?;
    let report = dispatcher.run(usernames).await?;

    info!(entries = store.len(), "conversion complete, writing results");
    output::write_properties(&store.snapshot(), sink, output::DEFAULT_COMMENT)?;

    Ok(report)
}
