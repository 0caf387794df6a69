//! Configuration types for search, fetching, and credentials.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::SnapError;

/// Configuration for the paginated search client.
///
/// Immutable after construction; one instance is shared read-only by all
/// operations of a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// API developer key.
    pub api_key: String,
    /// Custom search engine identifier.
    pub engine_id: String,
    /// Directory snapshot records are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Maximum total results to collect per keyword. Must be positive.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Results requested per API page. Must be positive.
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
    /// Result language restriction passed to the API (`lr` parameter).
    #[serde(default = "default_language")]
    pub language: String,
    /// User agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Delay applied before every page request, including the first.
    #[serde(default = "default_page_delay")]
    pub page_delay_seconds: f64,
    /// Timeout for each search API request.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: f64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/snapshots")
}

fn default_max_results() -> usize {
    30
}

fn default_results_per_page() -> usize {
    10
}

fn default_language() -> String {
    "lang_ja".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string()
}

fn default_page_delay() -> f64 {
    1.0
}

fn default_timeout() -> f64 {
    15.0
}

impl SearchConfig {
    /// Creates a search configuration with default limits.
    #[must_use]
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            output_dir: default_output_dir(),
            max_results: default_max_results(),
            results_per_page: default_results_per_page(),
            language: default_language(),
            user_agent: default_user_agent(),
            page_delay_seconds: default_page_delay(),
            request_timeout_seconds: default_timeout(),
        }
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the result quota per keyword.
    #[must_use]
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_results_per_page(mut self, per_page: usize) -> Self {
        self.results_per_page = per_page;
        self
    }

    /// Sets the result language restriction.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the inter-page politeness delay.
    #[must_use]
    pub fn with_page_delay(mut self, seconds: f64) -> Self {
        self.page_delay_seconds = seconds;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, seconds: f64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    /// Gets the politeness delay as a Duration.
    #[must_use]
    pub fn page_delay(&self) -> Duration {
        Duration::from_secs_f64(self.page_delay_seconds)
    }

    /// Gets the request timeout as a Duration.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout_seconds)
    }

    /// Validates the quota settings.
    pub fn validate(&self) -> Result<(), SnapError> {
        if self.max_results == 0 {
            return Err(SnapError::invalid_config("max_results must be positive"));
        }
        if self.results_per_page == 0 {
            return Err(SnapError::invalid_config(
                "results_per_page must be positive",
            ));
        }
        Ok(())
    }
}

/// Configuration for fetching snippet text from arbitrary pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whether to verify TLS certificates.
    ///
    /// Disabling this accepts invalid and self-signed certificates for
    /// compatibility with misconfigured sites. It weakens transport security
    /// for every snippet fetch, so it is an explicit opt-in rather than the
    /// default.
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    /// Maximum characters kept from an extracted snippet.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_verify_tls() -> bool {
    true
}

fn default_max_chars() -> usize {
    crate::text::DEFAULT_MAX_CHARS
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            verify_tls: default_verify_tls(),
            max_chars: default_max_chars(),
        }
    }
}

impl FetchConfig {
    /// Creates a fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Disables TLS certificate verification. See [`FetchConfig::verify_tls`].
    #[must_use]
    pub fn without_tls_verification(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Sets the snippet length cap.
    #[must_use]
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Gets the timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }
}

/// API credentials loaded from a YAML key file.
///
/// The file layout matches the conventional `keys.yaml`:
///
/// ```yaml
/// google:
///   api_key: "..."
///   custom_search_engine_id: "..."
/// gemini:
///   api_key: "..."
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// Google Custom Search credentials.
    #[serde(default)]
    pub google: Option<GoogleCredentials>,
    /// Gemini API credentials.
    #[serde(default)]
    pub gemini: Option<GeminiCredentials>,
}

/// Credentials for the Custom Search API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleCredentials {
    /// API developer key.
    pub api_key: String,
    /// Custom search engine identifier.
    pub custom_search_engine_id: String,
}

/// Credentials for the Gemini API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiCredentials {
    /// API key.
    pub api_key: String,
}

impl Credentials {
    /// Loads credentials from a YAML key file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Returns the Google credentials or a missing-credential error.
    pub fn google(&self) -> Result<&GoogleCredentials, SnapError> {
        self.google
            .as_ref()
            .ok_or_else(|| SnapError::missing_credential("google"))
    }

    /// Returns the Gemini credentials or a missing-credential error.
    pub fn gemini(&self) -> Result<&GeminiCredentials, SnapError> {
        self.gemini
            .as_ref()
            .ok_or_else(|| SnapError::missing_credential("gemini"))
    }
}
