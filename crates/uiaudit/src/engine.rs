//! Capability interface over the browser automation engine.
//!
//! The audit core never talks to a concrete engine; everything it needs is
//! expressed through [`UiAutomation`] and injected at construction. Tests run
//! against an in-memory fake, production wires in a real driver.

use crate::errors::AuditError;
use crate::screenshot::Screenshot;
use crate::types::{Bounds, Viewport};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Browser automation capability consumed by probes and scenarios.
///
/// Selector strings are opaque to the core. Visibility and geometry queries
/// against selectors that match nothing answer `Ok(false)` / `Ok(None)` /
/// `Ok(0)`; interaction-state queries and actions (`is_enabled`, `fill`,
/// `click`) error with `ElementNotFound` instead, since there is nothing to
/// act on. Probes recover from every `Err` at their own boundary.
#[async_trait]
pub trait UiAutomation: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), AuditError>;
    async fn current_url(&self) -> Result<String, AuditError>;

    async fn is_visible(&self, selector: &str) -> Result<bool, AuditError>;
    async fn is_enabled(&self, selector: &str) -> Result<bool, AuditError>;
    /// Bounding box of the first match, None when the element has no box
    /// (not rendered, detached).
    async fn bounds(&self, selector: &str) -> Result<Option<Bounds>, AuditError>;
    /// Bounding boxes of every match, in document order.
    async fn bounds_all(&self, selector: &str) -> Result<Vec<Bounds>, AuditError>;
    async fn count(&self, selector: &str) -> Result<usize, AuditError>;
    async fn attribute(&self, selector: &str, name: &str)
        -> Result<Option<String>, AuditError>;

    async fn fill(&self, selector: &str, text: &str) -> Result<(), AuditError>;
    async fn click(&self, selector: &str) -> Result<(), AuditError>;

    async fn viewport(&self) -> Result<Viewport, AuditError>;
    async fn set_viewport(&self, viewport: Viewport) -> Result<(), AuditError>;

    /// Capture the current page as a raw RGBA frame.
    async fn capture(&self) -> Result<Screenshot, AuditError>;
}

/// Shared handle to one page under audit.
///
/// Thin wrapper over the engine so page objects and probes can be cloned
/// freely within a scenario. All probes in one run execute sequentially
/// against one page instance.
#[derive(Clone)]
pub struct Page {
    engine: Arc<dyn UiAutomation>,
}

impl Page {
    pub fn new(engine: Arc<dyn UiAutomation>) -> Self {
        Self { engine }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn navigate(&self, url: &str) -> Result<(), AuditError> {
        self.engine.navigate(url).await
    }

    pub async fn current_url(&self) -> Result<String, AuditError> {
        self.engine.current_url().await
    }

    pub async fn is_visible(&self, selector: &str) -> Result<bool, AuditError> {
        self.engine.is_visible(selector).await
    }

    pub async fn is_enabled(&self, selector: &str) -> Result<bool, AuditError> {
        self.engine.is_enabled(selector).await
    }

    pub async fn bounds(&self, selector: &str) -> Result<Option<Bounds>, AuditError> {
        self.engine.bounds(selector).await
    }

    pub async fn bounds_all(&self, selector: &str) -> Result<Vec<Bounds>, AuditError> {
        self.engine.bounds_all(selector).await
    }

    pub async fn count(&self, selector: &str) -> Result<usize, AuditError> {
        self.engine.count(selector).await
    }

    pub async fn attribute(
        &self,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, AuditError> {
        self.engine.attribute(selector, name).await
    }

    pub async fn fill(&self, selector: &str, text: &str) -> Result<(), AuditError> {
        self.engine.fill(selector, text).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn click(&self, selector: &str) -> Result<(), AuditError> {
        self.engine.click(selector).await
    }

    pub async fn viewport(&self) -> Result<Viewport, AuditError> {
        self.engine.viewport().await
    }

    pub async fn set_viewport(&self, viewport: Viewport) -> Result<(), AuditError> {
        self.engine.set_viewport(viewport).await
    }

    pub async fn capture(&self) -> Result<Screenshot, AuditError> {
        self.engine.capture().await
    }
}
