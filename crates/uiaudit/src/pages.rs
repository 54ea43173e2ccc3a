//! Page objects for the audited application.
//!
//! Each page is a thin wrapper translating selectors into named operations.
//! Selectors are deliberately broad candidate lists so the same flows work
//! across styling changes; the engine resolves them to the first match.

use crate::engine::Page;
use crate::errors::AuditError;
use crate::types::{Severity, UiIssue, Viewport};
use tracing::{debug, warn};

/// `selector >> nth=i` addressing for the i-th match of a broad selector.
fn nth(selector: &str, i: usize) -> String {
    format!("{selector} >> nth={i}")
}

pub struct LoginPage {
    page: Page,
}

impl LoginPage {
    pub const EMAIL_INPUT: &'static str =
        r#"input[type="email"], input[type="text"], input[placeholder*="email" i]"#;
    pub const PASSWORD_INPUT: &'static str = r#"input[type="password"]"#;
    pub const LOGIN_BUTTON: &'static str =
        r#"button:has-text("Login"), button:has-text("Sign In"), button[type="submit"]"#;
    pub const LOGIN_FORM: &'static str = "form";

    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub async fn goto(&self, base_url: &str) -> Result<(), AuditError> {
        self.page.navigate(base_url).await
    }

    /// Fill both credential fields and submit.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuditError> {
        self.page.fill(Self::EMAIL_INPUT, email).await?;
        self.page.fill(Self::PASSWORD_INPUT, password).await?;
        self.page.click(Self::LOGIN_BUTTON).await
    }

    /// Whether the login button is still on screen (i.e. no redirect
    /// happened). Query failures count as "still here".
    pub async fn still_on_login_page(&self) -> bool {
        self.page
            .is_visible(Self::LOGIN_BUTTON)
            .await
            .unwrap_or(true)
    }
}

pub struct DashboardPage {
    page: Page,
}

impl DashboardPage {
    pub const MAIN_CONTENT: &'static str =
        ".main-content, .content-wrapper, main, .dashboard-content";
    pub const HEADER_BAR: &'static str = "header, .header, .navbar, .app-header";
    pub const SIDEBAR_MENU: &'static str = ".sidebar, .sidebar-menu, nav, .navigation";
    pub const CARD_ELEMENTS: &'static str = ".card, .dashboard-card, .widget, .panel";
    pub const USER_PROFILE: &'static str = ".user-profile, .profile-dropdown, .avatar";

    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Dashboard counts as loaded when any of its main regions is visible.
    /// Query failures count against loading, matching the treatment of a
    /// failed navigation as a finding rather than an abort.
    pub async fn is_loaded(&self) -> bool {
        for region in [Self::MAIN_CONTENT, Self::HEADER_BAR, Self::SIDEBAR_MENU] {
            match self.page.is_visible(region).await {
                Ok(true) => return true,
                Ok(false) => {}
                Err(e) => debug!(region, error = %e, "region query failed"),
            }
        }
        false
    }

    /// Click a sidebar menu entry by its visible text, falling back to any
    /// link with that text.
    pub async fn navigate_to(&self, menu_item: &str) -> Result<(), AuditError> {
        let candidates = [
            format!(r#"{} >> text="{menu_item}""#, Self::SIDEBAR_MENU),
            format!(r#"a:has-text("{menu_item}")"#),
        ];
        for selector in &candidates {
            if self.page.count(selector).await? > 0 {
                return self.page.click(selector).await;
            }
        }
        Err(AuditError::ElementNotFound(format!(
            "Could not find menu item: {menu_item}"
        )))
    }

    /// Responsive layout checks at one viewport; restores the original
    /// viewport on every path. The sidebar is only required from tablet
    /// width up.
    pub async fn responsiveness(&self, viewport: Viewport) -> Vec<UiIssue> {
        let mut issues = Vec::new();

        let original = match self.page.viewport().await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "cannot read viewport, skipping dashboard responsiveness check");
                return issues;
            }
        };
        if let Err(e) = self.page.set_viewport(viewport).await {
            warn!(%viewport, error = %e, "viewport resize failed");
            return issues;
        }

        if let Ok(false) = self.page.is_visible(Self::SIDEBAR_MENU).await {
            if viewport.width >= 768 {
                issues.push(UiIssue::new(
                    Self::SIDEBAR_MENU,
                    format!("Sidebar not visible at {viewport} when it should be"),
                    Severity::Medium,
                ));
            }
        }
        if let Ok(false) = self.page.is_visible(Self::MAIN_CONTENT).await {
            issues.push(UiIssue::new(
                Self::MAIN_CONTENT,
                format!("Main content not visible at {viewport}"),
                Severity::Medium,
            ));
        }

        if let Err(e) = self.page.set_viewport(original).await {
            warn!(error = %e, "failed to restore original viewport");
        }

        issues
    }
}

pub struct SettingsPage {
    page: Page,
}

impl SettingsPage {
    pub const CONTAINER: &'static str =
        ".settings-container, .settings-wrapper, .settings-content, #settings";
    pub const FORM: &'static str = "form, .form, .settings-form";
    pub const SAVE_BUTTON: &'static str =
        r#"button:has-text("Save"), button:has-text("Apply"), button[type="submit"]"#;
    pub const CANCEL_BUTTON: &'static str =
        r#"button:has-text("Cancel"), button:has-text("Reset")"#;
    pub const INPUT_FIELDS: &'static str =
        r#"input[type="text"], input[type="email"], input[type="number"], textarea"#;

    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub async fn is_loaded(&self) -> bool {
        self.page
            .is_visible(Self::CONTAINER)
            .await
            .unwrap_or(false)
    }

    /// Every input needs either an associated label or a non-empty
    /// placeholder, and must actually render.
    pub async fn input_field_issues(&self) -> Vec<UiIssue> {
        let mut issues = Vec::new();

        let field_count = match self.page.count(Self::INPUT_FIELDS).await {
            Ok(n) => n,
            Err(e) => {
                debug!(error = %e, "input field count failed, no finding");
                return issues;
            }
        };

        for i in 0..field_count {
            let field = nth(Self::INPUT_FIELDS, i);

            let has_placeholder = matches!(
                self.page.attribute(&field, "placeholder").await,
                Ok(Some(p)) if !p.is_empty()
            );
            let has_label = match self.page.attribute(&field, "id").await {
                Ok(Some(id)) if !id.is_empty() => {
                    let label_selector = format!(r#"label[for="{id}"]"#);
                    self.page.count(&label_selector).await.unwrap_or(0) > 0
                }
                _ => false,
            };
            if !has_label && !has_placeholder {
                issues.push(UiIssue::new(
                    field.clone(),
                    format!("Input field {} has no visible label or placeholder", i + 1),
                    Severity::Low,
                ));
            }

            if let Ok(false) = self.page.is_visible(&field).await {
                issues.push(UiIssue::new(
                    field,
                    format!("Input field {} is not visible", i + 1),
                    Severity::Medium,
                ));
            }
        }

        issues
    }

    /// Responsive layout checks at one viewport; restores the original
    /// viewport on every path. The save button is only required from tablet
    /// width up.
    pub async fn responsiveness(&self, viewport: Viewport) -> Vec<UiIssue> {
        let mut issues = Vec::new();

        let original = match self.page.viewport().await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "cannot read viewport, skipping settings responsiveness check");
                return issues;
            }
        };
        if let Err(e) = self.page.set_viewport(viewport).await {
            warn!(%viewport, error = %e, "viewport resize failed");
            return issues;
        }

        if let Ok(false) = self.page.is_visible(Self::FORM).await {
            issues.push(UiIssue::new(
                Self::FORM,
                format!("Settings form not visible at {viewport} viewport"),
                Severity::Medium,
            ));
        }
        if let Ok(false) = self.page.is_visible(Self::SAVE_BUTTON).await {
            if viewport.width >= 768 {
                issues.push(UiIssue::new(
                    Self::SAVE_BUTTON,
                    format!("Save button not visible at {viewport} viewport"),
                    Severity::Medium,
                ));
            }
        }

        if let Err(e) = self.page.set_viewport(original).await {
            warn!(error = %e, "failed to restore original viewport");
        }

        issues
    }
}
