//! Common types shared by probes, the collector and the reporting handoff.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Ordinal importance of a detected UI defect. Drives reporting priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Tracker priority this severity maps to.
    pub fn priority(&self) -> Priority {
        match self {
            Severity::Critical => Priority::Highest,
            Severity::High => Priority::High,
            Severity::Medium => Priority::Medium,
            Severity::Low => Priority::Low,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        write!(f, "{name}")
    }
}

/// Four-level priority scale of the external ticketing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Highest,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Highest => "Highest",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One detected UI defect.
///
/// The `issue` text is the deduplication key for the run's collector; the
/// `screenshot` path is an attached artifact and not part of identity.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiIssue {
    /// Element or selector under test. Free-form, not guaranteed unique.
    pub element: String,
    /// Human-readable description of the problem. Deduplication key.
    pub issue: String,
    pub severity: Severity,
    /// Path to a captured visual artifact, if one was taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
}

impl UiIssue {
    pub fn new(element: impl Into<String>, issue: impl Into<String>, severity: Severity) -> Self {
        Self {
            element: element.into(),
            issue: issue.into(),
            severity,
            screenshot: None,
        }
    }

    pub fn with_screenshot(mut self, path: impl AsRef<Path>) -> Self {
        self.screenshot = Some(path.as_ref().to_path_buf());
        self
    }
}

/// A viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Bounding box of an element, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_low_to_critical() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn severity_maps_to_tracker_priority() {
        assert_eq!(Severity::Critical.priority(), Priority::Highest);
        assert_eq!(Severity::High.priority(), Priority::High);
        assert_eq!(Severity::Medium.priority(), Priority::Medium);
        assert_eq!(Severity::Low.priority(), Priority::Low);
    }

    #[test]
    fn issue_serializes_without_null_screenshot() {
        let issue = UiIssue::new(".sidebar-menu", "Sidebar menu is clipped", Severity::Medium);
        let json = serde_json::to_string(&issue).unwrap();
        assert!(!json.contains("screenshot"));

        let with_shot = issue.with_screenshot("reports/screenshots/sidebar.png");
        let json = serde_json::to_string(&with_shot).unwrap();
        assert!(json.contains("sidebar.png"));
    }
}
