//! Replay a saved `ui-issues.json` through the ticketing handoff.
//!
//! Reads the issues file from the configured reports directory, files one
//! ticket per issue and writes the issue-to-ticket mapping next to it.

use anyhow::Result;
use tracing::{info, warn};
use uiaudit::{report, AuditConfig, StubTicketSink};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AuditConfig::from_env();
    let issues_path = config.reports_dir.join(report::ISSUES_FILE);

    if !issues_path.exists() {
        warn!("UI issues file not found: {}", issues_path.display());
        return Ok(());
    }

    let issues = report::load_issues(&issues_path)?;
    info!("found {} UI issues in file", issues.len());

    if issues.is_empty() {
        info!("no issues to create tickets for");
        return Ok(());
    }

    let sink = StubTicketSink::new();
    let run = report::finalize(&issues, &sink, &config).await?;

    info!("created the following tickets:");
    for record in &run.tickets {
        info!("- {}: {}", record.ticket, record.issue);
    }
    info!("ticket creation complete");

    Ok(())
}
