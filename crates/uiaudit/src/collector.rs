//! Run-scoped issue accumulation with set-membership deduplication.

use crate::types::UiIssue;
use std::collections::HashSet;
use tracing::{debug, info};

/// The ordered sequence of unique issues accumulated across one audit run.
///
/// Deduplication is keyed on the `issue` description text, exact string
/// equality only. Cosmetically different wordings of the same defect stay
/// distinct; that trades recall for precision on purpose. Discovery order of
/// first occurrences is preserved for reporting.
///
/// One collector is passed explicitly into each scenario; there is no
/// process-wide issue state.
#[derive(Debug, Default)]
pub struct IssueCollector {
    seen: HashSet<String>,
    issues: Vec<UiIssue>,
}

impl IssueCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a candidate issue. Returns true and appends it iff no
    /// previously admitted issue carries the same description text.
    pub fn admit(&mut self, candidate: UiIssue) -> bool {
        if self.seen.contains(&candidate.issue) {
            debug!(issue = %candidate.issue, "duplicate issue, skipping");
            return false;
        }
        info!("Found UI issue: {} ({})", candidate.issue, candidate.severity);
        self.seen.insert(candidate.issue.clone());
        self.issues.push(candidate);
        true
    }

    /// Admit each candidate in order; returns how many were admitted.
    pub fn admit_all(&mut self, candidates: impl IntoIterator<Item = UiIssue>) -> usize {
        let mut admitted = 0;
        for candidate in candidates {
            if self.admit(candidate) {
                admitted += 1;
            }
        }
        admitted
    }

    /// Fold another collector into this one, re-applying deduplication.
    pub fn merge(&mut self, other: IssueCollector) {
        for issue in other.issues {
            self.admit(issue);
        }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[UiIssue] {
        &self.issues
    }

    pub fn iter(&self) -> impl Iterator<Item = &UiIssue> {
        self.issues.iter()
    }

    pub fn into_issues(self) -> Vec<UiIssue> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn issue(text: &str) -> UiIssue {
        UiIssue::new(".widget", text, Severity::Medium)
    }

    #[test]
    fn admits_first_occurrence_only() {
        let mut collector = IssueCollector::new();
        assert!(collector.admit(issue("widgets overflow container")));
        assert!(!collector.admit(issue("widgets overflow container")));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn preserves_discovery_order() {
        let mut collector = IssueCollector::new();
        collector.admit(issue("a"));
        collector.admit(issue("b"));
        collector.admit(issue("a"));
        collector.admit(issue("c"));
        collector.admit(issue("b"));

        let texts: Vec<&str> = collector.iter().map(|i| i.issue.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn no_two_collected_entries_share_text() {
        let mut collector = IssueCollector::new();
        for text in ["x", "y", "x", "z", "y", "x"] {
            collector.admit(issue(text));
        }
        let mut texts: Vec<&str> = collector.iter().map(|i| i.issue.as_str()).collect();
        let before = texts.len();
        texts.dedup();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), before);
    }

    #[test]
    fn near_duplicate_wordings_stay_distinct() {
        let mut collector = IssueCollector::new();
        collector.admit(issue("Element not visible at viewport size 375x667"));
        collector.admit(issue("Element not visible at viewport size 768x1024"));
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn merge_reapplies_dedup() {
        let mut left = IssueCollector::new();
        left.admit(issue("a"));
        left.admit(issue("b"));

        let mut right = IssueCollector::new();
        right.admit(issue("b"));
        right.admit(issue("c"));

        left.merge(right);
        let texts: Vec<&str> = left.iter().map(|i| i.issue.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn admit_all_reports_admitted_count() {
        let mut collector = IssueCollector::new();
        let admitted =
            collector.admit_all(vec![issue("a"), issue("a"), issue("b")]);
        assert_eq!(admitted, 2);
    }
}
