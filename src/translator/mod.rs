pub mod chunk;
pub mod errors;
pub mod provider;

pub use errors::TranslateError;
pub use provider::{HttpTranslateProvider, TranslateProvider};

use crate::segmenter::{Paragraphs, profile_for};
use std::sync::Arc;
use tracing::{info, instrument};

/// Per-call character limit imposed by the translation provider.
pub const TRANSLATE_CHUNK_LIMIT: usize = 5000;

/// Translates arbitrarily long text through a length-capped provider by
/// splitting on sentence boundaries and translating the chunks strictly in
/// order.
pub struct ChunkedTranslator {
    provider: Arc<dyn TranslateProvider>,
    limit: usize,
}

impl ChunkedTranslator {
    pub fn new(provider: Arc<dyn TranslateProvider>) -> Self {
        Self::with_limit(provider, TRANSLATE_CHUNK_LIMIT)
    }

    pub fn with_limit(provider: Arc<dyn TranslateProvider>, limit: usize) -> Self {
        Self { provider, limit }
    }

    /// Translate `text` from `source` to `target`.
    ///
    /// Short texts go straight through. Long texts are split at sentence
    /// boundaries and the chunks are translated sequentially (provider rate
    /// limits, and output order must match input order), then concatenated
    /// with no separator. A failed chunk aborts the whole translation; a
    /// partially translated article is worse than a clear failure.
    #[instrument(skip_all, fields(len = text.chars().count(), source = source, target = target))]
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        if text.chars().count() <= self.limit {
            return self.provider.translate(text, source, target).await;
        }

        let profile = profile_for(source);
        let chunks = chunk::split_chunks(text, self.limit, profile.chunk_breaks);
        info!("translating {} chunks sequentially", chunks.len());

        let mut translated = String::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let piece = self
                .provider
                .translate(chunk, source, target)
                .await
                .map_err(|source| TranslateError::Chunk {
                    index,
                    source: Box::new(source),
                })?;
            translated.push_str(&piece);
        }

        Ok(translated)
    }

    /// Translate already-segmented paragraphs in one batch call, preserving
    /// the paragraph structure. Any paragraph over the provider limit is
    /// translated on its own through the chunked path instead.
    #[instrument(skip_all, fields(count = paragraphs.len(), source = source, target = target))]
    pub async fn translate_paragraphs(
        &self,
        paragraphs: &Paragraphs,
        source: &str,
        target: &str,
    ) -> Result<Paragraphs, TranslateError> {
        if paragraphs.is_empty() {
            return Ok(Paragraphs::default());
        }

        let fits = paragraphs
            .iter()
            .all(|p| p.chars().count() <= self.limit);

        if fits {
            let translated = self
                .provider
                .translate_batch(paragraphs.as_slice(), source, target)
                .await?;
            return Ok(Paragraphs::new(translated));
        }

        // Oversized paragraphs fall back to per-paragraph chunked calls.
        let mut out = Vec::with_capacity(paragraphs.len());
        for paragraph in paragraphs.iter() {
            out.push(self.translate(paragraph, source, target).await?);
        }
        Ok(Paragraphs::new(out))
    }
}
