//! Audit scenarios for the login, dashboard and settings flows.
//!
//! Each scenario drives one page through its checks and feeds candidate
//! issues into the collector passed in by the caller. A failed navigation or
//! login is itself a Critical finding and short-circuits the rest of that
//! scenario, since nothing downstream is reachable. Probe-level failures
//! never abort a scenario.

use crate::collector::IssueCollector;
use crate::config::AuditConfig;
use crate::engine::Page;
use crate::pages::{DashboardPage, LoginPage, SettingsPage};
use crate::probe::UiProbe;
use crate::types::{Severity, UiIssue, Viewport};
use tracing::{debug, instrument, warn};

/// Viewport simulated for the mobile login check.
const MOBILE_VIEWPORT: Viewport = Viewport::new(375, 667);

/// Viewport simulated for the dashboard tablet check.
const TABLET_VIEWPORT: Viewport = Viewport::new(768, 1024);

/// Viewports swept over the settings page.
const SETTINGS_VIEWPORTS: [Viewport; 3] = [
    Viewport::new(1920, 1080),
    Viewport::new(1366, 768),
    Viewport::new(768, 1024),
];

/// Dashboard regions swept with the generic probes, (name, selector).
pub const DASHBOARD_ELEMENTS: &[(&str, &str)] = &[
    ("Sidebar Menu", ".sidebar-menu"),
    ("Dashboard Widget", ".dashboard-widget"),
    ("User Profile", ".user-profile"),
    ("Notification Icon", ".notification-icon"),
    ("Search Box", ".search-box"),
    ("Dashboard Header", ".dashboard-header"),
];

/// Settings regions swept with the generic probes, (name, selector).
pub const SETTINGS_ELEMENTS: &[(&str, &str)] = &[
    ("Settings Tabs", ".settings-tabs"),
    ("Profile Settings", ".profile-settings"),
    ("Notification Settings", ".notification-settings"),
    ("Settings Header", ".settings-header"),
];

/// Visibility with probe-failure semantics: an errored query is treated as
/// "present", i.e. no finding.
async fn visible_or_assume(page: &Page, selector: &str) -> bool {
    match page.is_visible(selector).await {
        Ok(v) => v,
        Err(e) => {
            debug!(selector, error = %e, "visibility query failed, assuming present");
            true
        }
    }
}

/// Run responsiveness, alignment and interactivity probes over a set of
/// named regions, admitting every finding.
async fn sweep_elements(
    probe: &UiProbe,
    elements: &[(&str, &str)],
    collector: &mut IssueCollector,
) {
    for (name, selector) in elements {
        debug!("checking element: {name} ({selector})");
        collector.admit_all(probe.responsiveness(selector).await);
        collector.admit_all(probe.alignment(selector).await);
        collector.admit_all(probe.interactivity(selector).await);
    }
}

/// Log in with the configured credentials and confirm the dashboard came
/// up. On failure records the Critical finding and returns false so the
/// caller can short-circuit.
async fn login_to_dashboard(
    page: &Page,
    config: &AuditConfig,
    collector: &mut IssueCollector,
) -> bool {
    let login = LoginPage::new(page.clone());
    let dashboard = DashboardPage::new(page.clone());
    let probe = UiProbe::new(page.clone());

    if let Err(e) = login.goto(&config.base_url).await {
        warn!(error = %e, "login page failed to load");
        collector.admit(UiIssue::new(
            "Login page",
            "Login page failed to load",
            Severity::Critical,
        ));
        return false;
    }

    if let Err(e) = login
        .login(&config.credentials.email, &config.credentials.password)
        .await
    {
        warn!(error = %e, "login submission failed");
    }

    if !dashboard.is_loaded().await {
        let issue = UiIssue::new(
            "Dashboard",
            "Dashboard fails to load after successful login",
            Severity::Critical,
        );
        let issue = probe
            .attach_screenshot(issue, &config.screenshots_dir, "dashboard-login-failure")
            .await;
        collector.admit(issue);
        return false;
    }
    true
}

/// Audit the login page: required controls, field consistency, mobile
/// rendering and empty-submission validation.
#[instrument(skip_all)]
pub async fn audit_login(page: &Page, config: &AuditConfig, collector: &mut IssueCollector) {
    let login = LoginPage::new(page.clone());
    let probe = UiProbe::new(page.clone());

    if let Err(e) = login.goto(&config.base_url).await {
        warn!(error = %e, "login page failed to load");
        collector.admit(UiIssue::new(
            "Login page",
            "Login page failed to load",
            Severity::Critical,
        ));
        return;
    }

    let email_visible = visible_or_assume(page, LoginPage::EMAIL_INPUT).await;
    let password_visible = visible_or_assume(page, LoginPage::PASSWORD_INPUT).await;
    let button_visible = visible_or_assume(page, LoginPage::LOGIN_BUTTON).await;

    if !email_visible {
        let issue = UiIssue::new(
            "Email input",
            "Email/username input field not visible on login page",
            Severity::Critical,
        );
        let issue = probe
            .attach_screenshot(issue, &config.screenshots_dir, "login-page-missing-email")
            .await;
        collector.admit(issue);
    }
    if !password_visible {
        let issue = UiIssue::new(
            "Password input",
            "Password input field not visible on login page",
            Severity::Critical,
        );
        let issue = probe
            .attach_screenshot(issue, &config.screenshots_dir, "login-page-missing-password")
            .await;
        collector.admit(issue);
    }
    if !button_visible {
        let issue = UiIssue::new(
            "Login button",
            "Login button not visible on login page",
            Severity::Critical,
        );
        let issue = probe
            .attach_screenshot(issue, &config.screenshots_dir, "login-page-missing-button")
            .await;
        collector.admit(issue);
    }

    // Consistency checks only make sense once the basic controls exist.
    if !(email_visible && password_visible && button_visible) {
        return;
    }

    collector.admit_all(
        probe
            .pair_alignment(
                "Login form input",
                LoginPage::EMAIL_INPUT,
                LoginPage::PASSWORD_INPUT,
            )
            .await,
    );
    collector.admit_all(
        probe
            .control_height("Email input field", LoginPage::EMAIL_INPUT)
            .await,
    );
    collector.admit_all(
        probe
            .control_height("Password input field", LoginPage::PASSWORD_INPUT)
            .await,
    );

    mobile_login_check(page, config, collector).await;
    empty_submission_check(page, config, collector).await;
}

/// Simulate a phone viewport and require the whole login form to stay
/// visible. Restores the original viewport on every path.
async fn mobile_login_check(page: &Page, config: &AuditConfig, collector: &mut IssueCollector) {
    let probe = UiProbe::new(page.clone());

    let original = match page.viewport().await {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "cannot read viewport, skipping mobile login check");
            return;
        }
    };
    if let Err(e) = page.set_viewport(MOBILE_VIEWPORT).await {
        warn!(error = %e, "viewport resize failed, skipping mobile login check");
        return;
    }

    let all_visible = visible_or_assume(page, LoginPage::EMAIL_INPUT).await
        && visible_or_assume(page, LoginPage::PASSWORD_INPUT).await
        && visible_or_assume(page, LoginPage::LOGIN_BUTTON).await;

    if !all_visible {
        let issue = UiIssue::new(
            "Login form",
            "Login form elements not properly displayed on mobile viewports",
            Severity::High,
        );
        let issue = probe
            .attach_screenshot(issue, &config.screenshots_dir, "login-page-mobile")
            .await;
        collector.admit(issue);
    }

    if let Err(e) = page.set_viewport(original).await {
        warn!(error = %e, "failed to restore original viewport");
    }
}

/// Submit the form with empty credentials; leaving the login page means
/// validation let an empty submission through.
async fn empty_submission_check(
    page: &Page,
    config: &AuditConfig,
    collector: &mut IssueCollector,
) {
    let login = LoginPage::new(page.clone());

    if let Err(e) = login.login("", "").await {
        debug!(error = %e, "empty submission attempt failed, no finding");
        return;
    }

    let still_here = login.still_on_login_page().await;
    let on_base_url = match page.current_url().await {
        Ok(url) => url.starts_with(config.base_url.trim_end_matches('/')),
        Err(e) => {
            debug!(error = %e, "url query failed, assuming still on login page");
            true
        }
    };

    if !still_here || !on_base_url {
        collector.admit(UiIssue::new(
            "Login form validation",
            "Login form allows submission with empty fields",
            Severity::High,
        ));
    }
}

/// Audit the dashboard after login: sidebar presence, card layout, tablet
/// rendering, the generic element sweep, and settings navigation.
#[instrument(skip_all)]
pub async fn audit_dashboard(page: &Page, config: &AuditConfig, collector: &mut IssueCollector) {
    if !login_to_dashboard(page, config, collector).await {
        return;
    }

    let dashboard = DashboardPage::new(page.clone());
    let probe = UiProbe::new(page.clone());

    if !visible_or_assume(page, DashboardPage::SIDEBAR_MENU).await {
        let issue = UiIssue::new(
            "Sidebar",
            "Navigation sidebar not visible on dashboard",
            Severity::High,
        );
        let issue = probe
            .attach_screenshot(issue, &config.screenshots_dir, "dashboard-missing-sidebar")
            .await;
        collector.admit(issue);
    }

    for issue in probe.card_layout(DashboardPage::CARD_ELEMENTS).await {
        let issue = probe
            .attach_screenshot(issue, &config.screenshots_dir, "dashboard-card-issue")
            .await;
        collector.admit(issue);
    }

    collector.admit_all(dashboard.responsiveness(TABLET_VIEWPORT).await);

    sweep_elements(&probe, DASHBOARD_ELEMENTS, collector).await;

    match dashboard.navigate_to("Settings").await {
        Ok(()) => {
            let url = page.current_url().await.unwrap_or_default();
            if url == config.base_url {
                collector.admit(UiIssue::new(
                    "Navigation",
                    "Unable to navigate to Settings page from dashboard",
                    Severity::High,
                ));
            }
        }
        Err(e) => {
            warn!(error = %e, "settings navigation failed");
            collector.admit(UiIssue::new(
                "Navigation",
                "Error when attempting to navigate to Settings page",
                Severity::High,
            ));
        }
    }
}

/// Audit the settings page reached from the dashboard: form alignment,
/// labelled inputs, action button sizing, the generic element sweep, and
/// responsive rendering.
#[instrument(skip_all)]
pub async fn audit_settings(page: &Page, config: &AuditConfig, collector: &mut IssueCollector) {
    if !login_to_dashboard(page, config, collector).await {
        return;
    }

    let dashboard = DashboardPage::new(page.clone());
    let settings = SettingsPage::new(page.clone());
    let probe = UiProbe::new(page.clone());

    let navigated = dashboard.navigate_to("Settings").await;
    if navigated.is_err() || !settings.is_loaded().await {
        if let Err(e) = navigated {
            warn!(error = %e, "settings navigation failed");
        }
        let issue = UiIssue::new(
            "Settings page",
            "Failed to load Settings page from dashboard navigation",
            Severity::Critical,
        );
        let issue = probe
            .attach_screenshot(
                issue,
                &config.screenshots_dir,
                "settings-page-navigation-failure",
            )
            .await;
        collector.admit(issue);
        return;
    }

    collector.admit_all(probe.alignment(SettingsPage::FORM).await);
    collector.admit_all(settings.input_field_issues().await);
    collector.admit_all(
        probe
            .control_height("Save button", SettingsPage::SAVE_BUTTON)
            .await,
    );
    collector.admit_all(
        probe
            .control_height("Cancel button", SettingsPage::CANCEL_BUTTON)
            .await,
    );

    sweep_elements(&probe, SETTINGS_ELEMENTS, collector).await;

    for viewport in SETTINGS_VIEWPORTS {
        collector.admit_all(settings.responsiveness(viewport).await);
    }
}
