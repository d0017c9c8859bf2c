use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Structured result of an AI sentence analysis. Loosely-typed fields hold
/// whatever shape the model produced; the cache stores and returns them
/// without interpretation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SentenceAnalysis {
    pub original_sentence: String,
    pub sentence_structure: serde_json::Value,
    pub grammar: serde_json::Value,
    pub meaning: String,
    pub key_vocabulary: serde_json::Value,
    pub grammar_points: Vec<String>,
    pub learning_tip: Option<String>,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Request(String),

    #[error("analysis api returned status {0}")]
    Api(reqwest::StatusCode),

    #[error("analysis response could not be parsed: {0}")]
    Parse(String),
}

/// An AI service that produces per-sentence analyses. Consumed as a black
/// box; deduplication lives in [`crate::analysis::AnalysisCache`].
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn parse_sentence(&self, sentence: &str) -> Result<SentenceAnalysis, AnalysisError>;
}

#[derive(Debug, Serialize)]
struct ParseSentenceRequest<'a> {
    sentence: &'a str,
}

/// The gateway relays the model's raw output; `content` frequently arrives
/// wrapped in a markdown code fence.
#[derive(Debug, Deserialize)]
struct ParseSentenceResponse {
    content: String,
}

pub struct HttpAnalysisProvider {
    client: Client,
    base_url: Url,
    api_key: String,
}

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

impl HttpAnalysisProvider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AnalysisError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AnalysisError::Request(format!("invalid base url: {e}")))?;
        let client = Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .map_err(|e| AnalysisError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl AnalysisProvider for HttpAnalysisProvider {
    #[instrument(skip_all, fields(len = sentence.len()))]
    async fn parse_sentence(&self, sentence: &str) -> Result<SentenceAnalysis, AnalysisError> {
        let endpoint = self
            .base_url
            .join("sentence/parse")
            .map_err(|e| AnalysisError::Request(format!("invalid endpoint: {e}")))?;

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(&ParseSentenceRequest { sentence })
            .send()
            .await
            .map_err(|e| AnalysisError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Api(response.status()));
        }

        let body: ParseSentenceResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(format!("malformed envelope: {e}")))?;

        let payload = clean_model_payload(&body.content);
        serde_json::from_str(payload).map_err(|e| AnalysisError::Parse(e.to_string()))
    }
}

/// Strip the markdown fences and surrounding chatter models like to wrap
/// around their JSON, leaving the outermost object.
pub(crate) fn clean_model_payload(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(end) = text.rfind("```") {
        text = &text[..end];
    }
    text = text.trim();

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}'))
        && end > start
    {
        text = &text[start..=end];
    }

    text
}
