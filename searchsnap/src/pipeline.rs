//! Sequential search-and-save batch driver.

use tracing::warn;

use crate::errors::SnapError;
use crate::models::{RunSummary, SearchOutcome};
use crate::search::{SearchApi, SearchClient};
use crate::store::ResultStore;

/// Runs search-and-save over a keyword list, one keyword at a time.
///
/// Deliberately sequential: no fan-out across keywords or pages, keeping the
/// per-call politeness delay meaningful toward the search API. One keyword's
/// failure never stops the rest of the batch.
#[derive(Debug)]
pub struct SnapshotPipeline<A: SearchApi> {
    client: SearchClient<A>,
    store: ResultStore,
}

impl<A: SearchApi> SnapshotPipeline<A> {
    /// Creates a pipeline from a search client and a store.
    #[must_use]
    pub fn new(client: SearchClient<A>, store: ResultStore) -> Self {
        Self { client, store }
    }

    /// Creates a pipeline whose store writes to the client's configured
    /// output directory, keeping a single source of truth for the path.
    pub fn from_client(client: SearchClient<A>) -> Result<Self, SnapError> {
        let store = ResultStore::new(&client.config().output_dir)?;
        Ok(Self { client, store })
    }

    /// Searches and persists a snapshot for every keyword.
    pub async fn run(&self, keywords: &[String]) -> RunSummary {
        let mut summary = RunSummary::default();

        for keyword in keywords {
            match self.client.search(keyword).await {
                SearchOutcome::Found(bundle) => match self.store.save(&bundle) {
                    Ok(Some(_)) => summary.record_saved(),
                    Ok(None) => summary.record_empty(),
                    Err(e) => {
                        warn!(keyword = %keyword, error = %e, "failed to save snapshot");
                        summary.record_failed();
                    }
                },
                SearchOutcome::Empty => summary.record_empty(),
                SearchOutcome::Failed(_) => summary.record_failed(),
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::models::{SearchResultBundle, SearchResultItem};
    use crate::search::SearchPage;
    use crate::store::ResultStore;
    use crate::testing::MockSearchApi;

    fn test_config() -> SearchConfig {
        SearchConfig::new("key", "engine")
            .with_page_delay(0.0)
            .with_max_results(10)
    }

    fn item(n: usize) -> SearchResultItem {
        SearchResultItem {
            title: Some(format!("result {n}")),
            link: format!("https://example.com/{n}"),
            snippet: format!("<b>snippet {n}</b>"),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_single_keyword() {
        let dir = tempfile::tempdir().unwrap();
        let api = MockSearchApi::new();
        api.push_page(SearchPage {
            items: vec![item(0), item(1)],
            next_start: None,
        });

        let client = SearchClient::new(api, test_config()).unwrap();
        let store = ResultStore::new(dir.path()).unwrap();
        let pipeline = SnapshotPipeline::new(client, store);

        let summary = pipeline.run(&["WIDGET-9X".to_string()]).await;
        assert_eq!(summary.saved, 1);

        let today = SearchResultBundle::new("x").snapshot_date;
        let path = dir.path().join(format!("WIDGET-9X_{today}.yaml"));
        assert!(path.exists());

        let saved = ResultStore::load(path).unwrap();
        assert_eq!(saved.results.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_keyword_produces_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let api = MockSearchApi::new();
        api.push_page(SearchPage::default());

        let client = SearchClient::new(api, test_config()).unwrap();
        let store = ResultStore::new(dir.path()).unwrap();
        let pipeline = SnapshotPipeline::new(client, store);

        let summary = pipeline.run(&["NOHIT-000".to_string()]).await;
        assert_eq!(summary.empty, 1);
        assert_eq!(summary.saved, 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_batch_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let api = MockSearchApi::new();
        // First keyword: hard failure. Second: nothing found. Third: one hit.
        api.push_error(SnapError::api(500, "down"));
        api.push_page(SearchPage::default());
        api.push_page(SearchPage {
            items: vec![item(0)],
            next_start: None,
        });

        let client = SearchClient::new(api, test_config()).unwrap();
        let store = ResultStore::new(dir.path()).unwrap();
        let pipeline = SnapshotPipeline::new(client, store);

        let keywords = vec![
            "FAIL-1".to_string(),
            "EMPTY-2".to_string(),
            "HIT-3".to_string(),
        ];
        let summary = pipeline.run(&keywords).await;

        assert_eq!(summary.searched, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.empty, 1);
        assert_eq!(summary.saved, 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_from_client_writes_to_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("snapshots");

        let api = MockSearchApi::new();
        api.push_page(SearchPage {
            items: vec![item(0)],
            next_start: None,
        });

        let config = test_config().with_output_dir(&out);
        let client = SearchClient::new(api, config).unwrap();
        let pipeline = SnapshotPipeline::from_client(client).unwrap();

        let summary = pipeline.run(&["WIDGET-9X".to_string()]).await;
        assert_eq!(summary.saved, 1);
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
    }
}
