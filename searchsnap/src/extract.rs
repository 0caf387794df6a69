//! Snippet extraction from arbitrary web pages.
//!
//! Fetches a URL, verifies the declared content type, decodes the body using
//! a sniffed character encoding, and pulls representative text out of the
//! HTML with a two-tier selection strategy. Extraction is best-effort by
//! contract: any failure degrades to an empty string so one bad page never
//! aborts a batch.
//!
//! [`PageFetcher`] is the seam between extraction and the wire, mirroring
//! [`crate::search::SearchApi`]: one implementation performs the HTTP GET,
//! and tests supply canned responses through
//! [`crate::testing::MockPageFetcher`].

use async_trait::async_trait;
use chardetng::EncodingDetector;
use scraper::{Html, Selector};
use tracing::warn;

use crate::config::FetchConfig;
use crate::errors::SnapError;
use crate::text::clean_text;

/// Paragraph count at or above which tier 1 applies.
const MIN_PARAGRAPHS: usize = 3;
/// Paragraphs joined in tier 1.
const MAX_PARAGRAPHS: usize = 6;
/// Minimum block text length kept by the tier 2 fallback.
const MIN_BLOCK_CHARS: usize = 40;

/// A fetched page before decoding.
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// Declared `Content-Type` header value; empty when the header is absent.
    pub content_type: String,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// Protocol for one page fetch.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a URL, returning its declared content type and raw body.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, SnapError>;
}

/// Production [`PageFetcher`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher from the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, SnapError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, SnapError> {
        let response = self.client.get(url).send().await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.bytes().await?.to_vec();
        Ok(FetchedPage { content_type, body })
    }
}

/// Fetches and extracts snippet text from web pages.
#[derive(Debug, Clone)]
pub struct SnippetFetcher<F: PageFetcher = HttpPageFetcher> {
    fetcher: F,
    config: FetchConfig,
}

impl SnippetFetcher<HttpPageFetcher> {
    /// Creates an HTTP-backed fetcher from the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, SnapError> {
        let fetcher = HttpPageFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: PageFetcher> SnippetFetcher<F> {
    /// Creates a snippet fetcher over the given page fetcher.
    #[must_use]
    pub fn with_fetcher(fetcher: F, config: FetchConfig) -> Self {
        Self { fetcher, config }
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches snippet text for a URL.
    ///
    /// Returns cleaned, truncated text, or an empty string when the response
    /// is not HTML or when anything goes wrong. Failures are logged at warn
    /// level and never propagated.
    pub async fn fetch_snippet(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url, error = %e, "snippet fetch failed");
                String::new()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String, SnapError> {
        let page = self.fetcher.fetch(url).await?;

        // The content-type gate runs before any decode or parse work.
        if !is_html_content_type(&page.content_type) {
            return Ok(String::new());
        }

        let body = decode_bytes(&page.body);
        let html = Html::parse_document(&body);
        Ok(clean_text(&select_content(&html), self.config.max_chars))
    }
}

/// Whether a `Content-Type` header value indicates an HTML document.
#[must_use]
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.contains("text/html") || content_type.contains("application/xhtml")
}

/// Decodes raw response bytes to text.
///
/// The encoding is sniffed from the byte content; UTF-8 is the fallback when
/// detection is inconclusive. Undecodable sequences are replaced rather than
/// reported, so this never fails.
#[must_use]
pub fn decode_bytes(bytes: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Selects representative text from a parsed HTML document.
///
/// Tier 1: when the document has at least 3 paragraph elements, the text of
/// the first 6 paragraphs is joined by newlines. Tier 2: otherwise every
/// `p`/`div`/`span` block whose text exceeds 40 characters contributes a
/// line. The tie-break order matters; tier 2 only runs when tier 1 does not
/// apply.
#[must_use]
pub fn select_content(html: &Html) -> String {
    let Ok(paragraphs) = Selector::parse("p") else {
        return String::new();
    };

    let texts: Vec<String> = html
        .select(&paragraphs)
        .map(element_text)
        .collect();

    if texts.len() >= MIN_PARAGRAPHS {
        return texts
            .into_iter()
            .take(MAX_PARAGRAPHS)
            .collect::<Vec<_>>()
            .join("\n");
    }

    let Ok(blocks) = Selector::parse("p, div, span") else {
        return String::new();
    };
    html.select(&blocks)
        .map(element_text)
        .filter(|text| text.chars().count() > MIN_BLOCK_CHARS)
        .collect::<Vec<_>>()
        .join("\n")
}

fn element_text(element: scraper::ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
