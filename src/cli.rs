//! Command-line surface of `convertuuid`.
//!
//! Parsing lives here rather than in the binary so the whole invocation
//! path (read, dispatch, write) can be driven from tests.

use crate::config::Config;
use crate::engine::{DispatchReport, Dispatcher, DispatcherConfig};
use crate::error::{Error, Result};
use crate::input::read_usernames;
use crate::lookup::HttpProfileLookup;
use crate::output::{DEFAULT_COMMENT, write_properties, write_unresolved};
use crate::store::ResultStore;
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "convertuuid", about = "Convert usernames to profile UUIDs")]
pub struct Cli {
    /// File with one username per line
    pub input: PathBuf,
    /// Properties file to write username=uuid pairs to
    pub output: PathBuf,
    /// Maximum concurrent lookups (overrides MAX_JOBS)
    #[arg(long, short = 'j')]
    pub max_jobs: Option<usize>,
    /// Also write usernames that could not be resolved to this file
    #[arg(long)]
    pub unresolved: Option<PathBuf>,
}

/// Convert `cli.input` into `cli.output`.
///
/// Output files are only created after every lookup has finished, so a
/// rejected run leaves any existing file untouched.
pub async fn run(cli: &Cli, config: &Config) -> Result<DispatchReport> {
    let usernames = read_usernames(&cli.input)?;
    info!(count = usernames.len(), input = %cli.input.display(), "usernames loaded");

    let dispatcher_config =
        DispatcherConfig::with_max_concurrency(cli.max_jobs.unwrap_or(config.max_jobs));
    let lookup = Arc::new(HttpProfileLookup::from_config(config)?);
    let store = ResultStore::new();
    let dispatcher = Dispatcher::new(lookup, store.clone(), dispatcher_config)?;

    let report = dispatcher.run(usernames).await?;

    info!(entries = store.len(), output = %cli.output.display(), "writing results");
    write_properties(&store.snapshot(), create(&cli.output)?, DEFAULT_COMMENT)?;

    if let Some(path) = &cli.unresolved {
        write_unresolved(&report, create(path)?)?;
    }

    Ok(report)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new).map_err(Error::Output)
}
