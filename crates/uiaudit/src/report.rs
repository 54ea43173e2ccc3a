//! Reporting handoff: persist the run's issues and drive ticket creation.
//!
//! The collected sequence is always serialized, even when empty, so the
//! worst case of a degraded run stays observable. Ticket creation is
//! continue-on-error with a sentinel key per failed entry.

use crate::config::AuditConfig;
use crate::errors::AuditError;
use crate::ticket::{TicketRequest, TicketSink};
use crate::types::UiIssue;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

pub const ISSUES_FILE: &str = "ui-issues.json";
pub const TICKETS_FILE: &str = "jira-tickets.json";

/// Delay between successive ticket calls; respects the tracker's assumed
/// rate limit. Policy knob, not a correctness requirement.
pub const TICKET_PACING: Duration = Duration::from_millis(500);

/// One row of the issue-to-ticket mapping written at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub issue: String,
    pub ticket: String,
}

/// Everything the handoff produced: where the issues landed and the
/// per-issue ticket mapping, in collection order.
#[derive(Debug)]
pub struct RunReport {
    pub issues_path: PathBuf,
    pub tickets: Vec<TicketRecord>,
}

/// Sentinel ticket identifier recorded when creation failed for one issue.
pub fn failure_sentinel() -> String {
    format!("ERROR-{}", chrono::Utc::now().timestamp_millis())
}

/// Serialize the ordered issue sequence to `ui-issues.json` under `dir`.
pub fn save_issues(issues: &[UiIssue], dir: &Path) -> Result<PathBuf, AuditError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(ISSUES_FILE);
    fs::write(&path, serde_json::to_string_pretty(issues)?)?;
    info!("saved {} UI issues to {}", issues.len(), path.display());
    Ok(path)
}

/// Read back a previously saved issue sequence.
pub fn load_issues(path: &Path) -> Result<Vec<UiIssue>, AuditError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Create one ticket per issue, sequentially, pacing calls by `pacing`.
///
/// A failure for one issue is logged and recorded as a sentinel key; the
/// remaining issues are still attempted. The returned vector has exactly one
/// entry per input issue, in order.
pub async fn create_tickets<S: TicketSink + ?Sized>(
    sink: &S,
    issues: &[UiIssue],
    project_key: &str,
    pacing: Duration,
) -> Vec<String> {
    let mut keys = Vec::with_capacity(issues.len());

    for (i, issue) in issues.iter().enumerate() {
        if i > 0 && !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }
        let request = TicketRequest::for_issue(issue, project_key);
        match sink.create_ticket(&request).await {
            Ok(key) => {
                info!("created ticket {} for issue: {}", key, issue.issue);
                keys.push(key);
            }
            Err(e) => {
                error!("failed to create ticket for issue: {}: {}", issue.issue, e);
                keys.push(failure_sentinel());
            }
        }
    }

    keys
}

/// End-of-run handoff: persist the issues, file tickets through the sink,
/// and persist the issue-to-ticket mapping.
pub async fn finalize<S: TicketSink + ?Sized>(
    issues: &[UiIssue],
    sink: &S,
    config: &AuditConfig,
) -> Result<RunReport, AuditError> {
    let issues_path = save_issues(issues, &config.reports_dir)?;

    let keys = create_tickets(sink, issues, &config.jira.project_key, TICKET_PACING).await;
    let tickets: Vec<TicketRecord> = issues
        .iter()
        .zip(keys)
        .map(|(issue, ticket)| TicketRecord {
            issue: issue.issue.clone(),
            ticket,
        })
        .collect();

    let tickets_path = config.reports_dir.join(TICKETS_FILE);
    fs::write(&tickets_path, serde_json::to_string_pretty(&tickets)?)?;
    info!(
        "wrote ticket mapping for {} issues to {}",
        tickets.len(),
        tickets_path.display()
    );

    Ok(RunReport {
        issues_path,
        tickets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    #[test]
    fn issues_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let issues = vec![
            UiIssue::new(".sidebar-menu", "Sidebar menu is clipped", Severity::Medium),
            UiIssue::new(
                "button.save-button",
                "Save button lacks proper focus state",
                Severity::Low,
            )
            .with_screenshot("reports/screenshots/save-button.png"),
        ];

        let path = save_issues(&issues, dir.path()).unwrap();
        let loaded = load_issues(&path).unwrap();
        assert_eq!(loaded, issues);
    }

    #[test]
    fn empty_run_is_still_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_issues(&[], dir.path()).unwrap();
        assert_eq!(load_issues(&path).unwrap(), Vec::<UiIssue>::new());
    }

    #[test]
    fn sentinel_is_recognizable() {
        assert!(failure_sentinel().starts_with("ERROR-"));
    }
}
