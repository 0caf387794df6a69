//! Keyword classification against candidate categories.
//!
//! The classifier is a collaborator of the snapshot pipeline: given a
//! keyword, optional web context, and a category list, it answers with a
//! single-word label. [`GeminiClassifier`] is the production implementation;
//! the trait seam keeps the pipeline testable without network access.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::SnapError;
use crate::models::SearchResultBundle;
use crate::store::ResultStore;

/// Snippets from a snapshot used as classification context.
const MAX_CONTEXT_SNIPPETS: usize = 3;

/// Protocol for keyword category classification.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classifies `keyword` into one of `categories`, optionally grounded in
    /// web `context`. Returns the chosen category as a single word.
    async fn classify(
        &self,
        keyword: &str,
        context: Option<&str>,
        categories: &[String],
    ) -> Result<String, SnapError>;
}

/// Builds the classification prompt.
///
/// With context, the model is asked to judge from the supplied snippets;
/// without, from its own knowledge. Either way the instruction is to answer
/// with exactly one word from the candidate list.
#[must_use]
pub fn build_prompt(keyword: &str, context: Option<&str>, categories: &[String]) -> String {
    let candidates = categories.join(", ");
    match context {
        Some(context) => format!(
            "You are an expert in industrial products.\n\n\
             Based on the web information below, determine which of the \
             following categories best classifies the keyword '{keyword}'. \
             Respond with only one word.\n\n\
             Category candidates: {candidates}\n\n\
             Snippets:\n{context}"
        ),
        None => format!(
            "You are an expert in industrial products.\n\n\
             Based on your knowledge, determine which of the following \
             categories best classifies the keyword '{keyword}'. \
             Respond with only one word.\n\n\
             Category candidates: {candidates}"
        ),
    }
}

/// Joins the first few snippets of a snapshot into classification context.
#[must_use]
pub fn snapshot_context(bundle: &SearchResultBundle) -> String {
    bundle
        .results
        .iter()
        .take(MAX_CONTEXT_SNIPPETS)
        .map(|item| item.snippet.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Classifies a keyword from a persisted snapshot record.
///
/// Loads the bundle at `path`, uses its first snippets as context, and
/// delegates to the classifier.
pub async fn classify_snapshot<C: Classifier>(
    classifier: &C,
    path: impl AsRef<Path>,
    categories: &[String],
) -> Result<String, SnapError> {
    let bundle = ResultStore::load(path)?;
    let context = snapshot_context(&bundle);
    classifier
        .classify(&bundle.keyword, Some(&context), categories)
        .await
}

const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// [`Classifier`] backed by the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiClassifier {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClassifier {
    /// Creates a classifier with the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SnapError> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Creates a classifier for a specific model.
    pub fn with_model(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, SnapError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl Classifier for GeminiClassifier {
    async fn classify(
        &self,
        keyword: &str,
        context: Option<&str>,
        categories: &[String],
    ) -> Result<String, SnapError> {
        let prompt = build_prompt(keyword, context, categories);
        let url = format!("{GEMINI_URL}/{}:generateContent", self.model);

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SnapError::api(status.as_u16(), message));
        }

        let body: GenerateResponse = response.json().await?;
        body.first_text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| SnapError::empty_response("no candidate text in Gemini response"))
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .map(|part| part.text.as_str())
    }
}
