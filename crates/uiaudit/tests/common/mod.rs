//! In-memory fake automation engine and ticket sinks shared by the
//! integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uiaudit::ticket::{TicketRequest, TicketSink};
use uiaudit::{AuditError, Bounds, Screenshot, UiAutomation, Viewport};

/// Scripted state for one selector.
#[derive(Debug, Clone)]
pub struct FakeElement {
    pub visible: bool,
    pub enabled: bool,
    pub bounds: Option<Bounds>,
    pub attributes: HashMap<String, String>,
    /// Viewports at which the element disappears.
    pub hidden_at: Vec<Viewport>,
    /// URL the page moves to when this element is clicked.
    pub navigates_to: Option<String>,
}

impl FakeElement {
    pub fn visible() -> Self {
        Self {
            visible: true,
            enabled: true,
            bounds: None,
            attributes: HashMap::new(),
            hidden_at: Vec::new(),
            navigates_to: None,
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::visible()
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn hidden_at(mut self, viewport: Viewport) -> Self {
        self.hidden_at.push(viewport);
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn navigates_to(mut self, url: &str) -> Self {
        self.navigates_to = Some(url.to_string());
        self
    }
}

#[derive(Debug)]
struct FakeState {
    url: String,
    viewport: Viewport,
    elements: HashMap<String, FakeElement>,
    grids: HashMap<String, Vec<Bounds>>,
    fail_navigation: bool,
}

/// One scripted page. Selectors are matched exactly against what the test
/// registered; everything else behaves as absent.
pub struct FakePage {
    state: Mutex<FakeState>,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                url: String::new(),
                viewport: Viewport::new(1366, 768),
                elements: HashMap::new(),
                grids: HashMap::new(),
                fail_navigation: false,
            }),
        }
    }

    pub fn insert(&self, selector: &str, element: FakeElement) {
        self.state
            .lock()
            .unwrap()
            .elements
            .insert(selector.to_string(), element);
    }

    pub fn insert_grid(&self, selector: &str, boxes: Vec<Bounds>) {
        self.state
            .lock()
            .unwrap()
            .grids
            .insert(selector.to_string(), boxes);
    }

    pub fn fail_navigation(&self) {
        self.state.lock().unwrap().fail_navigation = true;
    }

    pub fn viewport_now(&self) -> Viewport {
        self.state.lock().unwrap().viewport
    }

    fn element(&self, selector: &str) -> Option<FakeElement> {
        self.state.lock().unwrap().elements.get(selector).cloned()
    }
}

#[async_trait]
impl UiAutomation for FakePage {
    async fn navigate(&self, url: &str) -> Result<(), AuditError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_navigation {
            return Err(AuditError::PlatformError(
                "net::ERR_CONNECTION_REFUSED".to_string(),
            ));
        }
        state.url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String, AuditError> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool, AuditError> {
        let viewport = self.viewport_now();
        Ok(self
            .element(selector)
            .map(|el| el.visible && !el.hidden_at.contains(&viewport))
            .unwrap_or(false))
    }

    async fn is_enabled(&self, selector: &str) -> Result<bool, AuditError> {
        self.element(selector)
            .map(|el| el.enabled)
            .ok_or_else(|| AuditError::ElementNotFound(selector.to_string()))
    }

    async fn bounds(&self, selector: &str) -> Result<Option<Bounds>, AuditError> {
        Ok(self.element(selector).and_then(|el| el.bounds))
    }

    async fn bounds_all(&self, selector: &str) -> Result<Vec<Bounds>, AuditError> {
        if let Some(grid) = self.state.lock().unwrap().grids.get(selector) {
            return Ok(grid.clone());
        }
        Ok(self
            .element(selector)
            .and_then(|el| el.bounds)
            .into_iter()
            .collect())
    }

    async fn count(&self, selector: &str) -> Result<usize, AuditError> {
        let state = self.state.lock().unwrap();
        if let Some(grid) = state.grids.get(selector) {
            return Ok(grid.len());
        }
        Ok(usize::from(state.elements.contains_key(selector)))
    }

    async fn attribute(
        &self,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, AuditError> {
        Ok(self
            .element(selector)
            .and_then(|el| el.attributes.get(name).cloned()))
    }

    async fn fill(&self, selector: &str, _text: &str) -> Result<(), AuditError> {
        self.element(selector)
            .map(|_| ())
            .ok_or_else(|| AuditError::ElementNotFound(selector.to_string()))
    }

    async fn click(&self, selector: &str) -> Result<(), AuditError> {
        let target = self
            .element(selector)
            .ok_or_else(|| AuditError::ElementNotFound(selector.to_string()))?;
        if let Some(url) = target.navigates_to {
            self.state.lock().unwrap().url = url;
        }
        Ok(())
    }

    async fn viewport(&self) -> Result<Viewport, AuditError> {
        Ok(self.viewport_now())
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<(), AuditError> {
        self.state.lock().unwrap().viewport = viewport;
        Ok(())
    }

    async fn capture(&self) -> Result<Screenshot, AuditError> {
        Ok(Screenshot {
            image_data: vec![0xAB; 2 * 2 * 4],
            width: 2,
            height: 2,
        })
    }
}

/// Sink that fails for a scripted set of call indices (0-based) and mints
/// `UI-<n>` keys otherwise.
pub struct FailingSink {
    fail_indices: Vec<usize>,
    calls: AtomicUsize,
}

impl FailingSink {
    pub fn new(fail_indices: Vec<usize>) -> Self {
        Self {
            fail_indices,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TicketSink for FailingSink {
    async fn create_ticket(&self, _request: &TicketRequest) -> Result<String, AuditError> {
        let index = self.calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_indices.contains(&index) {
            return Err(AuditError::TicketFailed(
                "simulated tracker outage".to_string(),
            ));
        }
        Ok(format!("UI-{}", index + 1))
    }
}
