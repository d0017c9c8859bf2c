pub mod provider;
pub mod repository;
pub mod virtual_id;

pub use provider::{AnalysisError, AnalysisProvider, HttpAnalysisProvider, SentenceAnalysis};
pub use repository::AnalysisRepository;
pub use virtual_id::{normalize_sentence, virtual_sentence_id};

use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Content-addressed cache in front of the AI sentence-analysis service.
/// Identical sentences, from any user or article, resolve to one stored
/// analysis and cost one model call.
///
/// Storage problems never fail a request: a read error degrades to a cache
/// miss and a write error only loses the caching, not the result. Under
/// concurrent identical requests both callers may miss and both will call
/// the model; the atomic upsert means the last write wins with no
/// corruption, just a duplicated model call.
pub struct AnalysisCache {
    repo: AnalysisRepository,
    provider: Arc<dyn AnalysisProvider>,
}

impl AnalysisCache {
    pub fn new(pool: PgPool, provider: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            repo: AnalysisRepository::new(pool),
            provider,
        }
    }

    /// Return the cached analysis for `sentence`, or compute and store it.
    /// `source_article_id` is recorded for admin traceability when known.
    #[instrument(skip(self, sentence))]
    pub async fn get_or_compute(
        &self,
        sentence: &str,
        source_article_id: Option<i64>,
    ) -> Result<SentenceAnalysis, AnalysisError> {
        let id = virtual_sentence_id(sentence);

        match self.repo.get_sentence_results(id).await {
            Ok(Some(cached)) => match serde_json::from_str(&cached) {
                Ok(analysis) => {
                    info!("sentence analysis cache hit for {id}");
                    return Ok(analysis);
                }
                Err(err) => {
                    warn!("discarding unreadable cache entry {id}: {err}");
                }
            },
            Ok(None) => {}
            Err(err) => {
                // Safe degradation: a broken cache read must not block the
                // analysis itself.
                warn!("cache read failed for {id}, treating as miss: {err}");
            }
        }

        info!("sentence analysis cache miss for {id}, calling provider");
        let analysis = self.provider.parse_sentence(sentence).await?;

        match serde_json::to_string(&analysis) {
            Ok(json) => {
                if let Err(err) = self
                    .repo
                    .upsert_sentence_analysis(id, sentence, &json, source_article_id)
                    .await
                {
                    warn!("failed to store analysis for {id}: {err}");
                }
            }
            Err(err) => warn!("failed to serialize analysis for {id}: {err}"),
        }

        Ok(analysis)
    }
}
