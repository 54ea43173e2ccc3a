//! UI issue detection and deduplication for automated audit runs
//!
//! This crate drives a browser automation engine (injected behind the
//! [`UiAutomation`] capability trait) through login, dashboard and settings
//! flows, probing elements for visibility, alignment, interactivity and
//! sizing defects. Findings accumulate in a run-scoped, order-preserving
//! [`IssueCollector`] that deduplicates on issue text, and are handed off at
//! the end of the run to a serialized report plus an injected ticketing
//! collaborator.

use std::sync::Arc;
use tracing::instrument;

pub mod collector;
pub mod config;
pub mod engine;
pub mod errors;
pub mod pages;
pub mod probe;
pub mod report;
pub mod scenarios;
pub mod screenshot;
pub mod ticket;
pub mod types;

pub use collector::IssueCollector;
pub use config::AuditConfig;
pub use engine::{Page, UiAutomation};
pub use errors::AuditError;
pub use probe::UiProbe;
pub use report::{RunReport, TicketRecord};
pub use screenshot::Screenshot;
pub use ticket::{StubTicketSink, TicketRequest, TicketSink};
pub use types::{Bounds, Priority, Severity, UiIssue, Viewport};

/// One audit run against one page instance.
///
/// Owns the run's collector so scenarios share a single deduplicated issue
/// sequence; `finish` performs the reporting handoff and consumes the
/// session.
pub struct AuditSession {
    page: Page,
    config: AuditConfig,
    collector: IssueCollector,
}

impl AuditSession {
    pub fn new(engine: Arc<dyn UiAutomation>, config: AuditConfig) -> Self {
        Self {
            page: Page::new(engine),
            config,
            collector: IssueCollector::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub fn collector(&self) -> &IssueCollector {
        &self.collector
    }

    /// Audit the login page.
    #[instrument(skip(self))]
    pub async fn audit_login(&mut self) {
        scenarios::audit_login(&self.page, &self.config, &mut self.collector).await;
    }

    /// Audit the dashboard reached after login.
    #[instrument(skip(self))]
    pub async fn audit_dashboard(&mut self) {
        scenarios::audit_dashboard(&self.page, &self.config, &mut self.collector).await;
    }

    /// Audit the settings page reached from the dashboard.
    #[instrument(skip(self))]
    pub async fn audit_settings(&mut self) {
        scenarios::audit_settings(&self.page, &self.config, &mut self.collector).await;
    }

    /// Serialize the collected issues and file tickets through the sink.
    /// The run's issues are persisted even when the collection is empty.
    pub async fn finish<S: TicketSink + ?Sized>(self, sink: &S) -> Result<RunReport, AuditError> {
        report::finalize(self.collector.issues(), sink, &self.config).await
    }
}
