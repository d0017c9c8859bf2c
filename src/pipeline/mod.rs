use crate::analysis::{AnalysisCache, AnalysisError, AnalysisProvider, SentenceAnalysis};
use crate::extractor;
use crate::fetcher::{self, fetch_with_retry};
use crate::repositories::ArticleRepository;
use crate::segmenter::{self, Paragraphs, profile_for};
use crate::translator::{ChunkedTranslator, TranslateProvider};
use crate::aligner;
use anyhow::{Context, Result, anyhow};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Outcome of a batch ingestion run.
#[derive(Debug, Default, Clone, Copy)]
pub struct IngestSummary {
    pub stored: usize,
    pub skipped: usize,
}

/// Orchestrates the acquisition flow: fetch → extract → segment → persist,
/// and on demand chunk-translate → align → persist, plus cached sentence
/// analysis. Every operation runs on the caller's task; there is no internal
/// scheduling, parallelism, or cancellation.
pub struct Pipeline {
    articles: ArticleRepository,
    translator: ChunkedTranslator,
    cache: AnalysisCache,
}

impl Pipeline {
    pub fn new(
        pool: PgPool,
        translate_provider: Arc<dyn TranslateProvider>,
        analysis_provider: Arc<dyn AnalysisProvider>,
    ) -> Self {
        Self {
            articles: ArticleRepository::new(pool.clone()),
            translator: ChunkedTranslator::new(translate_provider),
            cache: AnalysisCache::new(pool, analysis_provider),
        }
    }

    /// Fetch, extract, segment, and store one URL. Fetch and extraction
    /// failures are logged and yield `Ok(None)`: a bad URL means one fewer
    /// stored article, never a failed batch. Database errors do propagate.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn ingest(&self, url: &str) -> Result<Option<i64>> {
        let doc = match fetch_with_retry(url).await {
            Ok(doc) => doc,
            Err(err) => {
                warn!("could not fetch {url}: {err}");
                return Ok(None);
            }
        };

        let extracted = match extractor::extract(&doc) {
            Ok(extracted) => extracted,
            Err(err) => {
                warn!("extraction failed for {url}: {err}, skipping");
                return Ok(None);
            }
        };

        let profile = profile_for(extracted.language.as_deref().unwrap_or("en"));
        let paragraphs = segmenter::segment(&extracted.text, profile);

        let inserted = self
            .articles
            .insert(
                extracted.url.as_str(),
                &extracted.title,
                &paragraphs.to_text(),
                extracted.language.as_deref(),
                extracted.word_count as i32,
            )
            .await
            .context("failed to store article")?;

        match inserted {
            Some(id) => {
                info!(
                    "stored article {id}: {} paragraphs, {} words",
                    paragraphs.len(),
                    extracted.word_count
                );
                Ok(Some(id))
            }
            None => {
                info!("article already ingested: {url}");
                Ok(None)
            }
        }
    }

    /// Ingest a list of URLs sequentially, pausing politely between
    /// requests to different pages.
    pub async fn ingest_all(&self, urls: &[String]) -> Result<IngestSummary> {
        let mut summary = IngestSummary::default();
        for (i, url) in urls.iter().enumerate() {
            if i > 0 {
                fetcher::polite_pause().await;
            }
            match self.ingest(url).await? {
                Some(_) => summary.stored += 1,
                None => summary.skipped += 1,
            }
        }
        Ok(summary)
    }

    /// Produce and store the translated counterpart of a stored article:
    /// chunked translation of the full text, then paragraph alignment when
    /// the provider returned an unstructured block for a structured source.
    ///
    /// Translation failures surface as errors and nothing is stored; a
    /// clear failure beats a partially translated article.
    #[instrument(skip(self))]
    pub async fn translate_article(&self, article_id: i64) -> Result<String> {
        let article = self
            .articles
            .get(article_id)
            .await
            .context("failed to load article")?
            .ok_or_else(|| anyhow!("article {article_id} not found"))?;

        let source_lang = article.lang.as_deref().unwrap_or("en");
        let target_lang = "zh";
        let source_paragraphs = Paragraphs::from_text(&article.content);

        let raw = self
            .translator
            .translate(&article.content, source_lang, target_lang)
            .await
            .context("translation failed")?;

        let aligned = aligner::align(&raw, &source_paragraphs, profile_for(target_lang));
        let translation = aligned.to_text();

        self.articles
            .store_translation(article_id, &translation)
            .await
            .context("failed to store translation")?;

        info!(
            "translated article {article_id}: {} source paragraphs -> {} translated paragraphs",
            source_paragraphs.len(),
            aligned.len()
        );
        Ok(translation)
    }

    /// Cached per-sentence AI analysis; identical sentences are analyzed
    /// once regardless of who asks.
    pub async fn analyze_sentence(
        &self,
        sentence: &str,
        source_article_id: Option<i64>,
    ) -> Result<SentenceAnalysis, AnalysisError> {
        self.cache.get_or_compute(sentence, source_article_id).await
    }

    /// Record difficulty metadata computed by the external evaluator. The
    /// tag is stored verbatim; this pipeline never interprets it.
    pub async fn record_evaluation(&self, article_id: i64, difficulty_level: &str) -> Result<()> {
        let updated = self
            .articles
            .set_difficulty(article_id, difficulty_level)
            .await
            .context("failed to record evaluation")?;
        if !updated {
            return Err(anyhow!("article {article_id} not found"));
        }
        Ok(())
    }

    pub fn articles(&self) -> &ArticleRepository {
        &self.articles
    }
}
