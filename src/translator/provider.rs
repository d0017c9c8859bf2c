use crate::translator::errors::TranslateError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;
use url::Url;

/// A length-capped machine-translation backend. Implementations are dumb
/// request/response shims; chunking and ordering live in
/// [`crate::translator::ChunkedTranslator`].
#[async_trait]
pub trait TranslateProvider: Send + Sync {
    /// Translate a single text no longer than the provider limit.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError>;

    /// Translate several independent texts in one call. The response list is
    /// parallel to the request list: same length, same order.
    async fn translate_batch(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, TranslateError>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translated_text: String,
}

#[derive(Debug, Serialize)]
struct BatchTranslateRequest<'a> {
    texts: &'a [String],
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
struct BatchTranslateResponse {
    translated_texts: Vec<String>,
}

/// JSON-over-HTTP client for the translation service.
pub struct HttpTranslateProvider {
    client: Client,
    base_url: Url,
    api_key: String,
}

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

impl HttpTranslateProvider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, TranslateError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TranslateError::Request(format!("invalid base url: {e}")))?;
        let client = Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .map_err(|e| TranslateError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TranslateError> {
        self.base_url
            .join(path)
            .map_err(|e| TranslateError::Request(format!("invalid endpoint: {e}")))
    }
}

#[async_trait]
impl TranslateProvider for HttpTranslateProvider {
    #[instrument(skip_all, fields(len = text.len(), source = source, target = target))]
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let response = self
            .client
            .post(self.endpoint("translate")?)
            .bearer_auth(&self.api_key)
            .json(&TranslateRequest {
                text,
                source,
                target,
            })
            .send()
            .await
            .map_err(TranslateError::from_reqwest_error)?;

        if !response.status().is_success() {
            return Err(TranslateError::Api(response.status()));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Request(format!("malformed response: {e}")))?;

        if body.translated_text.is_empty() {
            return Err(TranslateError::Empty);
        }
        Ok(body.translated_text)
    }

    #[instrument(skip_all, fields(count = texts.len(), source = source, target = target))]
    async fn translate_batch(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, TranslateError> {
        let response = self
            .client
            .post(self.endpoint("translate/batch")?)
            .bearer_auth(&self.api_key)
            .json(&BatchTranslateRequest {
                texts,
                source,
                target,
            })
            .send()
            .await
            .map_err(TranslateError::from_reqwest_error)?;

        if !response.status().is_success() {
            return Err(TranslateError::Api(response.status()));
        }

        let body: BatchTranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Request(format!("malformed response: {e}")))?;

        if body.translated_texts.len() != texts.len() {
            return Err(TranslateError::BatchMismatch {
                sent: texts.len(),
                received: body.translated_texts.len(),
            });
        }
        Ok(body.translated_texts)
    }
}
