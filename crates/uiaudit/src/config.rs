//! Audit run configuration.
//!
//! Defaults cover a local run; every knob can be overridden through
//! `UIAUDIT_*` environment variables or a JSON config file.

use crate::errors::AuditError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeouts: Timeouts,
    pub jira: JiraConfig,
    pub reports_dir: PathBuf,
    pub screenshots_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub global_ms: u64,
    pub element_ms: u64,
    pub navigation_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    pub url: String,
    pub project_key: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            base_url: "https://admin.example.com/".to_string(),
            credentials: Credentials::default(),
            timeouts: Timeouts::default(),
            jira: JiraConfig::default(),
            reports_dir: PathBuf::from("./reports"),
            screenshots_dir: PathBuf::from("./reports/screenshots"),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: "superadmin@example.com".to_string(),
            password: "changeme".to_string(),
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            global_ms: 30_000,
            element_ms: 5_000,
            navigation_ms: 10_000,
        }
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            url: "https://example.atlassian.net".to_string(),
            project_key: "UI".to_string(),
        }
    }
}

impl Timeouts {
    pub fn element(&self) -> Duration {
        Duration::from_millis(self.element_ms)
    }

    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }
}

impl AuditConfig {
    /// Defaults overlaid with any `UIAUDIT_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        if let Some(v) = var("UIAUDIT_BASE_URL") {
            config.base_url = v;
        }
        if let Some(v) = var("UIAUDIT_USER_EMAIL") {
            config.credentials.email = v;
        }
        if let Some(v) = var("UIAUDIT_USER_PASSWORD") {
            config.credentials.password = v;
        }
        if let Some(v) = var("UIAUDIT_JIRA_URL") {
            config.jira.url = v;
        }
        if let Some(v) = var("UIAUDIT_JIRA_PROJECT_KEY") {
            config.jira.project_key = v;
        }
        if let Some(v) = var("UIAUDIT_REPORTS_DIR") {
            config.reports_dir = PathBuf::from(v);
        }
        if let Some(v) = var("UIAUDIT_SCREENSHOTS_DIR") {
            config.screenshots_dir = PathBuf::from(v);
        }
        config
    }

    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
