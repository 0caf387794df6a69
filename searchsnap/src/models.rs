//! Data models for search snapshots.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::errors::SnapError;

/// One search result as returned by a single API page.
///
/// Immutable once created. The `snippet` field holds the HTML-flavored
/// snippet from the API, not the plain-text one, so markup survives for
/// downstream rendering and highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Result title, when the API provided one.
    pub title: Option<String>,
    /// Result URL.
    pub link: String,
    /// HTML-fragment snippet text.
    pub snippet: String,
}

/// The full set of search results for one keyword at one point in time.
///
/// Created fresh per keyword per run, written once, then discarded.
/// Invariant: `results.len()` never exceeds the configured maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultBundle {
    /// The keyword this snapshot was captured for.
    pub keyword: String,
    /// Capture date in `YYYYMMDD` form; part of the record's identity.
    pub snapshot_date: String,
    /// Human-readable capture time.
    pub timestamp: String,
    /// Ordered results, capped at the configured maximum.
    pub results: Vec<SearchResultItem>,
}

impl SearchResultBundle {
    /// Creates an empty bundle stamped with the current local date and time.
    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Self {
        let now = Local::now();
        Self {
            keyword: keyword.into(),
            snapshot_date: now.format("%Y%m%d").to_string(),
            timestamp: now.format("%Y/%m/%d %H:%M:%S").to_string(),
            results: Vec::new(),
        }
    }

    /// Caps the result list at `max_results`.
    ///
    /// A page may return more items than the remaining quota; the cap is
    /// applied once at the end rather than mid-collection.
    pub fn truncate(&mut self, max_results: usize) {
        self.results.truncate(max_results);
    }

    /// The keyword with path separators replaced, safe for file names.
    #[must_use]
    pub fn safe_keyword(&self) -> String {
        self.keyword.replace('/', "_")
    }

    /// The file name this snapshot persists under.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}_{}.yaml", self.safe_keyword(), self.snapshot_date)
    }

    /// Whether the bundle carries any results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Outcome of a search for one keyword.
///
/// Distinguishes "found results" from "nothing found" from "failed before
/// anything arrived". An API error after partial collection still yields
/// [`SearchOutcome::Found`]: results gathered before the failure remain
/// usable.
#[derive(Debug)]
pub enum SearchOutcome {
    /// At least one result was collected.
    Found(SearchResultBundle),
    /// The API answered but no result was ever returned.
    Empty,
    /// The first request failed; nothing was collected.
    Failed(SnapError),
}

impl SearchOutcome {
    /// Returns the bundle if results were found.
    #[must_use]
    pub fn into_bundle(self) -> Option<SearchResultBundle> {
        match self {
            Self::Found(bundle) => Some(bundle),
            Self::Empty | Self::Failed(_) => None,
        }
    }

    /// Whether the outcome carries results.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Counters for one batch run over a keyword list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Keywords processed.
    pub searched: usize,
    /// Snapshots written.
    pub saved: usize,
    /// Keywords with no results at all.
    pub empty: usize,
    /// Keywords whose search or save failed.
    pub failed: usize,
}

impl RunSummary {
    /// Records a persisted snapshot.
    pub fn record_saved(&mut self) {
        self.searched += 1;
        self.saved += 1;
    }

    /// Records a keyword that produced no results.
    pub fn record_empty(&mut self) {
        self.searched += 1;
        self.empty += 1;
    }

    /// Records a failed keyword.
    pub fn record_failed(&mut self) {
        self.searched += 1;
        self.failed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_stamps_date_and_timestamp() {
        let bundle = SearchResultBundle::new("WIDGET-9X");
        assert_eq!(bundle.keyword, "WIDGET-9X");
        assert_eq!(bundle.snapshot_date.len(), 8);
        assert!(bundle.snapshot_date.chars().all(|c| c.is_ascii_digit()));
        assert!(bundle.timestamp.contains('/'));
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_bundle_truncate() {
        let mut bundle = SearchResultBundle::new("kw");
        for i in 0..12 {
            bundle.results.push(SearchResultItem {
                title: Some(format!("t{i}")),
                link: format!("https://example.com/{i}"),
                snippet: String::new(),
            });
        }
        bundle.truncate(10);
        assert_eq!(bundle.results.len(), 10);

        // Truncating below the current length is a no-op.
        bundle.truncate(20);
        assert_eq!(bundle.results.len(), 10);
    }

    #[test]
    fn test_safe_keyword_replaces_separators() {
        let mut bundle = SearchResultBundle::new("A/B-100");
        bundle.snapshot_date = "20260826".to_string();
        assert_eq!(bundle.safe_keyword(), "A_B-100");
        assert_eq!(bundle.file_name(), "A_B-100_20260826.yaml");
    }

    #[test]
    fn test_outcome_into_bundle() {
        let bundle = SearchResultBundle::new("kw");
        assert!(SearchOutcome::Found(bundle).into_bundle().is_some());
        assert!(SearchOutcome::Empty.into_bundle().is_none());
        assert!(!SearchOutcome::Empty.is_found());
    }

    #[test]
    fn test_run_summary_counters() {
        let mut summary = RunSummary::default();
        summary.record_saved();
        summary.record_empty();
        summary.record_failed();
        assert_eq!(summary.searched, 3);
        assert_eq!(summary.saved, 1);
        assert_eq!(summary.empty, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_bundle_yaml_round_trip() {
        let mut bundle = SearchResultBundle::new("NWC5E-STP1-Y-YL-10");
        bundle.results.push(SearchResultItem {
            title: None,
            link: "https://example.com".to_string(),
            snippet: "<b>NWC5E</b> cable".to_string(),
        });

        let yaml = serde_yaml::to_string(&bundle).unwrap();
        assert!(yaml.contains("keyword: NWC5E-STP1-Y-YL-10"));

        let back: SearchResultBundle = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, bundle);
    }
}
