//! Viewport/element probes.
//!
//! A probe inspects one element's state under one condition and reports zero
//! or more findings. Probes never abort the run: any failure while querying
//! the page (bounding box unavailable, element detached, engine timeout) is
//! logged and treated as absence-of-finding.

use crate::engine::Page;
use crate::screenshot;
use crate::types::{Severity, UiIssue, Viewport};
use std::path::Path;
use tracing::{debug, warn};

/// Viewports exercised by responsiveness probes, desktop first.
pub const RESPONSIVE_VIEWPORTS: [Viewport; 4] = [
    Viewport::new(1920, 1080),
    Viewport::new(1366, 768),
    Viewport::new(768, 1024),
    Viewport::new(375, 667),
];

/// Acceptable height range for interactive controls, in pixels.
pub const MIN_CONTROL_HEIGHT: f64 = 30.0;
pub const MAX_CONTROL_HEIGHT: f64 = 60.0;

/// Minimum usable card/widget size, in pixels.
pub const MIN_CARD_WIDTH: f64 = 100.0;
pub const MIN_CARD_HEIGHT: f64 = 80.0;

/// Paired controls may drift this many pixels before they count as
/// misaligned or inconsistently sized.
pub const ALIGNMENT_TOLERANCE: f64 = 5.0;

/// Runs visibility, alignment, interactivity and sizing checks against one
/// page and translates violated conditions into [`UiIssue`]s.
#[derive(Clone)]
pub struct UiProbe {
    page: Page,
}

impl UiProbe {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Check that the element stays visible across the standard viewport
    /// set. Mutates the active viewport and restores the original size
    /// before returning, findings or not.
    ///
    /// One issue per failed viewport, severity High.
    pub async fn responsiveness(&self, selector: &str) -> Vec<UiIssue> {
        let mut issues = Vec::new();

        let original = match self.page.viewport().await {
            Ok(v) => v,
            Err(e) => {
                // Without the original size there is no safe way to restore;
                // skip the whole check rather than leave the page mutated.
                warn!(selector, error = %e, "cannot read viewport, skipping responsiveness check");
                return issues;
            }
        };

        for viewport in RESPONSIVE_VIEWPORTS {
            if let Err(e) = self.page.set_viewport(viewport).await {
                warn!(selector, %viewport, error = %e, "viewport resize failed");
                continue;
            }
            match self.page.is_visible(selector).await {
                Ok(false) => issues.push(UiIssue::new(
                    selector,
                    format!("Element not visible at viewport size {viewport}"),
                    Severity::High,
                )),
                Ok(true) => {}
                Err(e) => {
                    debug!(selector, %viewport, error = %e, "visibility query failed, no finding");
                }
            }
        }

        if let Err(e) = self.page.set_viewport(original).await {
            warn!(selector, error = %e, "failed to restore original viewport");
        }

        issues
    }

    /// Check that the element's bounding box sits inside the viewport:
    /// non-negative origin, right edge within the viewport width.
    pub async fn alignment(&self, selector: &str) -> Vec<UiIssue> {
        let mut issues = Vec::new();

        let bounds = match self.page.bounds(selector).await {
            Ok(Some(b)) => b,
            Ok(None) => {
                issues.push(UiIssue::new(
                    selector,
                    "Element not found or not visible",
                    Severity::Medium,
                ));
                return issues;
            }
            Err(e) => {
                debug!(selector, error = %e, "bounds query failed, no finding");
                return issues;
            }
        };

        if bounds.x < 0.0 {
            issues.push(UiIssue::new(
                selector,
                "Element is positioned off-screen horizontally",
                Severity::Medium,
            ));
        }
        if bounds.y < 0.0 {
            issues.push(UiIssue::new(
                selector,
                "Element is positioned off-screen vertically",
                Severity::Medium,
            ));
        }

        match self.page.viewport().await {
            Ok(viewport) => {
                if bounds.x + bounds.width > viewport.width as f64 {
                    issues.push(UiIssue::new(
                        selector,
                        "Element extends beyond viewport width",
                        Severity::Medium,
                    ));
                }
            }
            Err(e) => debug!(selector, error = %e, "viewport query failed, no finding"),
        }

        issues
    }

    /// Compare two controls that are expected to line up: horizontal offset
    /// beyond tolerance is a Medium finding, width mismatch a Low one.
    /// `label` names the pair in the issue text (e.g. "Login form input").
    pub async fn pair_alignment(
        &self,
        label: &str,
        first: &str,
        second: &str,
    ) -> Vec<UiIssue> {
        let mut issues = Vec::new();

        let (a, b) = match (self.page.bounds(first).await, self.page.bounds(second).await) {
            (Ok(Some(a)), Ok(Some(b))) => (a, b),
            (Ok(_), Ok(_)) => return issues,
            (a, b) => {
                if let Err(e) = a.and(b) {
                    debug!(first, second, error = %e, "bounds query failed, no finding");
                }
                return issues;
            }
        };

        if (a.x - b.x).abs() > ALIGNMENT_TOLERANCE {
            issues.push(UiIssue::new(
                format!("{first}, {second}"),
                format!("{label} fields are not properly aligned horizontally"),
                Severity::Medium,
            ));
        }
        if (a.width - b.width).abs() > ALIGNMENT_TOLERANCE {
            issues.push(UiIssue::new(
                format!("{first}, {second}"),
                format!("{label} fields have inconsistent widths"),
                Severity::Low,
            ));
        }

        issues
    }

    /// A control that should accept input but reports disabled is a High
    /// finding.
    pub async fn interactivity(&self, selector: &str) -> Vec<UiIssue> {
        match self.page.is_enabled(selector).await {
            Ok(false) => vec![UiIssue::new(
                selector,
                "Element is disabled when it should be interactive",
                Severity::High,
            )],
            Ok(true) => Vec::new(),
            Err(e) => {
                debug!(selector, error = %e, "enabled query failed, no finding");
                Vec::new()
            }
        }
    }

    /// Interactive controls outside the 30-60px height band are hard to hit
    /// or visually heavy. `label` names the control in the issue text.
    pub async fn control_height(&self, label: &str, selector: &str) -> Vec<UiIssue> {
        match self.page.bounds(selector).await {
            Ok(Some(bounds))
                if bounds.height < MIN_CONTROL_HEIGHT || bounds.height > MAX_CONTROL_HEIGHT =>
            {
                vec![UiIssue::new(
                    selector,
                    format!("{label} height is not optimal"),
                    Severity::Low,
                )]
            }
            Ok(_) => Vec::new(),
            Err(e) => {
                debug!(selector, error = %e, "bounds query failed, no finding");
                Vec::new()
            }
        }
    }

    /// Card/widget grid checks: every match must render on-screen and at
    /// least 100x80px. A selector matching nothing is itself a finding.
    pub async fn card_layout(&self, selector: &str) -> Vec<UiIssue> {
        let mut issues = Vec::new();

        let boxes = match self.page.bounds_all(selector).await {
            Ok(boxes) => boxes,
            Err(e) => {
                debug!(selector, error = %e, "bounds query failed, no finding");
                return issues;
            }
        };

        if boxes.is_empty() {
            issues.push(UiIssue::new(
                selector,
                "No dashboard cards/widgets found",
                Severity::Medium,
            ));
            return issues;
        }

        for (i, bounds) in boxes.iter().enumerate() {
            if bounds.x < 0.0 || bounds.y < 0.0 {
                issues.push(UiIssue::new(
                    selector,
                    format!("Card/widget {} is positioned off-screen", i + 1),
                    Severity::Medium,
                ));
            }
            if bounds.width < MIN_CARD_WIDTH || bounds.height < MIN_CARD_HEIGHT {
                issues.push(UiIssue::new(
                    selector,
                    format!("Card/widget {} is too small for proper visibility", i + 1),
                    Severity::Medium,
                ));
            }
        }

        issues
    }

    /// Capture the current page state and attach the artifact to the issue.
    /// Capture failures leave the issue as-is; the finding still stands.
    pub async fn attach_screenshot(&self, issue: UiIssue, dir: &Path, name: &str) -> UiIssue {
        match self.page.capture().await {
            Ok(shot) => match screenshot::save_screenshot(&shot, dir, name) {
                Some(path) => issue.with_screenshot(path),
                None => issue,
            },
            Err(e) => {
                warn!(name, error = %e, "screenshot capture failed, reporting issue without artifact");
                issue
            }
        }
    }
}
