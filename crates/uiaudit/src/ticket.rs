//! Ticketing collaborator interface.
//!
//! Ticket creation is an injected capability, not an ambient global: the
//! core builds a [`TicketRequest`] per issue and hands it to whatever
//! [`TicketSink`] was wired in. The crate ships [`StubTicketSink`], which
//! mints local keys without touching any network.

use crate::errors::AuditError;
use crate::types::{Priority, UiIssue};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::info;

/// One ticket to be filed with the external tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketRequest {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub priority: Priority,
    pub labels: Vec<String>,
}

impl TicketRequest {
    /// Build the tracker payload for one detected issue.
    pub fn for_issue(issue: &UiIssue, project_key: &str) -> Self {
        Self {
            project_key: project_key.to_string(),
            summary: format!("UI Issue: {}", issue.issue),
            description: format_description(issue),
            priority: issue.severity.priority(),
            labels: vec![
                "ui-issue".to_string(),
                "automated-test".to_string(),
                issue.severity.to_string().to_lowercase(),
            ],
        }
    }
}

/// Jira-markup body for a UI issue ticket.
fn format_description(issue: &UiIssue) -> String {
    let screenshot_mention = if issue.screenshot.is_some() {
        "\n\nA screenshot of this issue has been captured and is available in the test results."
    } else {
        ""
    };

    format!(
        "h3. UI Issue Details\n\n\
         *Element:* {}\n\
         *Severity:* {}\n\n\
         h3. Issue Description\n\
         {}\n\n\
         h3. Steps to Reproduce\n\
         1. Navigate to the page containing the element\n\
         2. Observe the UI issue as described\n\
         3. See the attached screenshot (if available)\n\n\
         h3. Additional Information\n\
         This issue was automatically detected by the UI audit framework{}",
        issue.element, issue.severity, issue.issue, screenshot_mention
    )
}

/// External ticket-creation collaborator.
///
/// One call per issue; a failure for one issue must not block the rest, so
/// implementations report per-call errors rather than panicking or batching.
#[async_trait]
pub trait TicketSink: Send + Sync {
    /// Returns the created ticket's external key (e.g. "UI-42").
    async fn create_ticket(&self, request: &TicketRequest) -> Result<String, AuditError>;
}

/// Offline sink that mints sequential `<PROJECT>-<n>` keys.
///
/// Stands in wherever a real tracker connection is unavailable; the keys are
/// deterministic so runs stay reproducible.
#[derive(Debug, Default)]
pub struct StubTicketSink {
    counter: AtomicU32,
}

impl StubTicketSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketSink for StubTicketSink {
    async fn create_ticket(&self, request: &TicketRequest) -> Result<String, AuditError> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let key = format!("{}-{}", request.project_key, n);
        info!("created ticket {} for: {}", key, request.summary);
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    #[test]
    fn request_carries_priority_and_labels() {
        let issue = UiIssue::new(
            ".settings-tabs",
            "Settings tabs overlap on small screens",
            Severity::High,
        );
        let request = TicketRequest::for_issue(&issue, "UI");

        assert_eq!(request.priority, Priority::High);
        let critical = UiIssue::new("#login", "Login page failed to load", Severity::Critical);
        assert_eq!(
            TicketRequest::for_issue(&critical, "UI").priority,
            Priority::Highest
        );
        assert_eq!(
            request.summary,
            "UI Issue: Settings tabs overlap on small screens"
        );
        assert!(request.labels.contains(&"high".to_string()));
        assert!(request.description.contains("*Element:* .settings-tabs"));
    }

    #[test]
    fn description_mentions_screenshot_only_when_present() {
        let bare = UiIssue::new("a", "b", Severity::Low);
        assert!(!format_description(&bare).contains("screenshot of this issue"));

        let with_shot = bare.with_screenshot("reports/screenshots/b.png");
        assert!(format_description(&with_shot).contains("screenshot of this issue"));
    }

    #[tokio::test]
    async fn stub_sink_mints_sequential_keys() {
        let sink = StubTicketSink::new();
        let issue = UiIssue::new("a", "b", Severity::Medium);
        let request = TicketRequest::for_issue(&issue, "QA");

        assert_eq!(sink.create_ticket(&request).await.unwrap(), "QA-1");
        assert_eq!(sink.create_ticket(&request).await.unwrap(), "QA-2");
    }
}
