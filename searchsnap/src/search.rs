//! Paginated search client.
//!
//! [`SearchApi`] is the seam between pagination logic and the wire: one
//! implementation speaks the Google Custom Search JSON API, and tests supply
//! canned pages through [`crate::testing::MockSearchApi`]. The client walks
//! pages until a result quota is met, the API reports no next page, or a
//! request fails.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::SearchConfig;
use crate::errors::SnapError;
use crate::models::{SearchOutcome, SearchResultBundle, SearchResultItem};

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    /// Items on this page, in API order.
    pub items: Vec<SearchResultItem>,
    /// Start index of the next page, when one exists.
    pub next_start: Option<u32>,
}

/// Protocol for one paginated search request.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetches up to `num` results for `keyword` starting at `start_index`
    /// (1-based, per the Custom Search convention).
    async fn fetch_page(
        &self,
        keyword: &str,
        start_index: u32,
        num: usize,
    ) -> Result<SearchPage, SnapError>;
}

const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Production [`SearchApi`] backed by the Google Custom Search JSON API.
#[derive(Debug, Clone)]
pub struct GoogleCustomSearch {
    client: reqwest::Client,
    api_key: String,
    engine_id: String,
    language: String,
}

impl GoogleCustomSearch {
    /// Creates a Custom Search client from the given configuration.
    ///
    /// Every request carries the configured timeout; a hung API call cannot
    /// stall the pipeline past it.
    pub fn new(config: &SearchConfig) -> Result<Self, SnapError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            engine_id: config.engine_id.clone(),
            language: config.language.clone(),
        })
    }
}

#[async_trait]
impl SearchApi for GoogleCustomSearch {
    async fn fetch_page(
        &self,
        keyword: &str,
        start_index: u32,
        num: usize,
    ) -> Result<SearchPage, SnapError> {
        let response = self
            .client
            .get(CUSTOM_SEARCH_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", keyword),
                ("lr", self.language.as_str()),
                ("num", &num.to_string()),
                ("start", &start_index.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SnapError::api(status.as_u16(), message));
        }

        let body: ApiResponse = response.json().await?;
        Ok(body.into_page())
    }
}

/// Wire format of a Custom Search response, reduced to the fields used here.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    items: Vec<ApiItem>,
    #[serde(default)]
    queries: ApiQueries,
}

#[derive(Debug, Deserialize)]
struct ApiItem {
    title: Option<String>,
    link: String,
    // The HTML-flavored snippet, kept over the plain `snippet` field so
    // markup survives for downstream rendering.
    #[serde(rename = "htmlSnippet", default)]
    html_snippet: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiQueries {
    #[serde(rename = "nextPage", default)]
    next_page: Vec<ApiPageRef>,
}

#[derive(Debug, Deserialize)]
struct ApiPageRef {
    #[serde(rename = "startIndex")]
    start_index: u32,
}

impl ApiResponse {
    fn into_page(self) -> SearchPage {
        let items = self
            .items
            .into_iter()
            .map(|item| SearchResultItem {
                title: item.title,
                link: item.link,
                snippet: item.html_snippet,
            })
            .collect();
        let next_start = self.queries.next_page.first().map(|p| p.start_index);
        SearchPage { items, next_start }
    }
}

/// Paginating search client.
///
/// Sequential by design: one request at a time with a fixed politeness delay
/// before every call, including the first. No retry and no adaptive backoff.
#[derive(Debug)]
pub struct SearchClient<A: SearchApi> {
    api: A,
    config: SearchConfig,
}

impl<A: SearchApi> SearchClient<A> {
    /// Creates a client over the given API implementation.
    pub fn new(api: A, config: SearchConfig) -> Result<Self, SnapError> {
        config.validate()?;
        Ok(Self { api, config })
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Collects a snapshot of search results for one keyword.
    ///
    /// Pagination stops on whichever comes first: quota met, no next page,
    /// or a request error. Results gathered before an error are still
    /// returned; an error before any result yields
    /// [`SearchOutcome::Failed`].
    pub async fn search(&self, keyword: &str) -> SearchOutcome {
        let mut bundle = SearchResultBundle::new(keyword);
        let mut start_index: u32 = 1;

        info!(keyword, "searching");

        while bundle.results.len() < self.config.max_results {
            tokio::time::sleep(self.config.page_delay()).await;

            let page = match self
                .api
                .fetch_page(keyword, start_index, self.config.results_per_page)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    if bundle.is_empty() {
                        warn!(keyword, error = %e, "search failed before any result");
                        return SearchOutcome::Failed(e);
                    }
                    warn!(
                        keyword,
                        collected = bundle.results.len(),
                        error = %e,
                        "search error, stopping pagination"
                    );
                    break;
                }
            };

            bundle.results.extend(page.items);

            match page.next_start {
                Some(next) => start_index = next,
                None => break,
            }
        }

        if bundle.is_empty() {
            warn!(keyword, "no results found");
            return SearchOutcome::Empty;
        }

        bundle.truncate(self.config.max_results);
        SearchOutcome::Found(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSearchApi;

    fn test_config() -> SearchConfig {
        SearchConfig::new("key", "engine").with_page_delay(0.0)
    }

    fn page_of(count: usize, offset: usize, next_start: Option<u32>) -> SearchPage {
        let items = (0..count)
            .map(|i| SearchResultItem {
                title: Some(format!("result {}", offset + i)),
                link: format!("https://example.com/{}", offset + i),
                snippet: format!("<b>snippet</b> {}", offset + i),
            })
            .collect();
        SearchPage { items, next_start }
    }

    #[tokio::test]
    async fn test_stops_when_pages_run_out() {
        let api = MockSearchApi::new();
        api.push_page(page_of(2, 0, None));

        let client = SearchClient::new(api, test_config().with_max_results(10)).unwrap();
        let outcome = client.search("WIDGET-9X").await;

        let bundle = outcome.into_bundle().unwrap();
        assert_eq!(bundle.results.len(), 2);
        assert_eq!(bundle.keyword, "WIDGET-9X");
    }

    #[tokio::test]
    async fn test_stops_at_quota_with_endless_pages() {
        let api = MockSearchApi::new();
        api.push_page(page_of(10, 0, Some(11)));
        api.push_page(page_of(10, 10, Some(21)));
        api.push_page(page_of(10, 20, Some(31)));
        api.push_page(page_of(10, 30, Some(41)));

        let client = SearchClient::new(api, test_config().with_max_results(25)).unwrap();
        let outcome = client.search("kw").await;

        let bundle = outcome.into_bundle().unwrap();
        assert_eq!(bundle.results.len(), 25);
    }

    #[tokio::test]
    async fn test_cursor_advances_per_page() {
        let api = MockSearchApi::new();
        api.push_page(page_of(10, 0, Some(11)));
        api.push_page(page_of(10, 10, Some(21)));
        api.push_page(page_of(10, 20, None));

        let client = SearchClient::new(api, test_config().with_max_results(30)).unwrap();
        let outcome = client.search("kw").await;
        assert!(outcome.is_found());

        let SearchClient { api, .. } = client;
        assert_eq!(
            api.recorded_calls(),
            vec![
                ("kw".to_string(), 1),
                ("kw".to_string(), 11),
                ("kw".to_string(), 21),
            ]
        );
    }

    #[tokio::test]
    async fn test_zero_results_is_empty_outcome() {
        let api = MockSearchApi::new();
        api.push_page(SearchPage::default());

        let client = SearchClient::new(api, test_config()).unwrap();
        let outcome = client.search("kw").await;
        assert!(matches!(outcome, SearchOutcome::Empty));
    }

    #[tokio::test]
    async fn test_error_before_any_result_fails() {
        let api = MockSearchApi::new();
        api.push_error(SnapError::api(500, "boom"));

        let client = SearchClient::new(api, test_config()).unwrap();
        let outcome = client.search("kw").await;
        assert!(matches!(outcome, SearchOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_error_after_partial_keeps_results() {
        let api = MockSearchApi::new();
        api.push_page(page_of(10, 0, Some(11)));
        api.push_error(SnapError::api(429, "rate limited"));

        let client = SearchClient::new(api, test_config().with_max_results(30)).unwrap();
        let outcome = client.search("kw").await;

        let bundle = outcome.into_bundle().unwrap();
        assert_eq!(bundle.results.len(), 10);
    }

    #[tokio::test]
    async fn test_quota_met_exactly_makes_no_extra_call() {
        let api = MockSearchApi::new();
        api.push_page(page_of(10, 0, Some(11)));

        let client = SearchClient::new(api, test_config().with_max_results(10)).unwrap();
        let outcome = client.search("kw").await;
        assert!(outcome.is_found());

        let SearchClient { api, .. } = client;
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_quota_rejected_at_construction() {
        let api = MockSearchApi::new();
        let result = SearchClient::new(api, test_config().with_max_results(0));
        assert!(result.is_err());
    }

    #[test]
    fn test_api_response_mapping() {
        let json = serde_json::json!({
            "items": [
                {"title": "NWC5E cable", "link": "https://a.example", "htmlSnippet": "<b>NWC5E</b>"},
                {"link": "https://b.example"}
            ],
            "queries": {
                "nextPage": [{"startIndex": 11, "count": 10}]
            }
        });
        let response: ApiResponse = serde_json::from_value(json).unwrap();
        let page = response.into_page();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].snippet, "<b>NWC5E</b>");
        assert_eq!(page.items[1].title, None);
        assert_eq!(page.items[1].snippet, "");
        assert_eq!(page.next_start, Some(11));
    }

    #[test]
    fn test_api_response_without_next_page() {
        let response: ApiResponse = serde_json::from_value(serde_json::json!({
            "items": [{"link": "https://a.example"}]
        }))
        .unwrap();
        assert_eq!(response.into_page().next_start, None);
    }
}
