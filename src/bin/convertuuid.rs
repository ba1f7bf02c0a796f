//! convertuuid CLI — convert a username list into a username=uuid properties file.

use clap::Parser;
use convert_uuid::cli::{Cli, run};
use convert_uuid::config::Config;
use convert_uuid::telemetry::{TelemetryConfig, init_telemetry};
use std::time::Instant;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env_with_max_jobs(cli.max_jobs)?;

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "convertuuid".to_string(),
        default_filter: config.log_level.clone(),
    })?;

    let start = Instant::now();
    let report = run(&cli, &config).await?;

    info!(
        resolved = report.resolved,
        unresolved = report.unresolved.len(),
        "Done in {}ms.",
        start.elapsed().as_millis()
    );
    Ok(())
}
