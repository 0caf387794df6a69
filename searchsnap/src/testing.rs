//! Mock implementations for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::errors::SnapError;
use crate::extract::{FetchedPage, PageFetcher};
use crate::search::{SearchApi, SearchPage};

/// A mock [`SearchApi`] that replays queued pages and records calls.
///
/// Each call pops the next queued response. When the queue is exhausted, an
/// empty page with no next-page cursor is returned.
#[derive(Debug, Default)]
pub struct MockSearchApi {
    responses: Mutex<VecDeque<Result<SearchPage, SnapError>>>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl MockSearchApi {
    /// Creates a mock with an empty response queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful page.
    pub fn push_page(&self, page: SearchPage) {
        self.responses.lock().push_back(Ok(page));
    }

    /// Queues a failing call.
    pub fn push_error(&self, error: SnapError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Returns the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns the `(keyword, start_index)` pair of each call, in order.
    #[must_use]
    pub fn recorded_calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SearchApi for MockSearchApi {
    async fn fetch_page(
        &self,
        keyword: &str,
        start_index: u32,
        _num: usize,
    ) -> Result<SearchPage, SnapError> {
        self.calls.lock().push((keyword.to_string(), start_index));
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(SearchPage::default()))
    }
}

/// A mock [`PageFetcher`] that replays queued responses and records the
/// requested URLs.
///
/// Each call pops the next queued response. When the queue is exhausted, an
/// empty page with no content type is returned.
#[derive(Debug, Default)]
pub struct MockPageFetcher {
    responses: Mutex<VecDeque<Result<FetchedPage, SnapError>>>,
    urls: Mutex<Vec<String>>,
}

impl MockPageFetcher {
    /// Creates a mock with an empty response queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn push_page(&self, page: FetchedPage) {
        self.responses.lock().push_back(Ok(page));
    }

    /// Queues an HTML response with a UTF-8 content type.
    pub fn push_html(&self, body: &str) {
        self.push_page(FetchedPage {
            content_type: "text/html; charset=utf-8".to_string(),
            body: body.as_bytes().to_vec(),
        });
    }

    /// Queues a failing call.
    pub fn push_error(&self, error: SnapError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Returns the URL of each call, in order.
    #[must_use]
    pub fn requested_urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, SnapError> {
        self.urls.lock().push(url.to_string());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(FetchedPage::default()))
    }
}
