use crate::entities::AnalysisRecord;
use sqlx::PgPool;

/// Truncation length for the placeholder title recorded when a cached
/// sentence has no source article.
const TITLE_PREVIEW_CHARS: usize = 30;

/// Persistence for cached analyses, keyed by real or virtual article id.
pub struct AnalysisRepository {
    pool: PgPool,
}

impl AnalysisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, article_id: i64) -> Result<Option<AnalysisRecord>, sqlx::Error> {
        sqlx::query_as::<_, AnalysisRecord>(
            "SELECT article_id, category, title, sentence_content, sentence_parse_results,
                    source_article_id, last_analysis_type, created_at, updated_at
             FROM sentence_analyses WHERE article_id = $1",
        )
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Serialized analysis for a sentence id, when one has been cached.
    pub async fn get_sentence_results(
        &self,
        article_id: i64,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<String>>(
            "SELECT sentence_parse_results FROM sentence_analyses
             WHERE article_id = $1 AND sentence_parse_results IS NOT NULL",
        )
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await
        .map(Option::flatten)
    }

    /// Atomic insert-or-update of a cached sentence analysis. A single
    /// statement closes the select-then-insert race window: under concurrent
    /// identical requests the last write simply wins. The title records the
    /// source article for admin traceability when one is known.
    pub async fn upsert_sentence_analysis(
        &self,
        article_id: i64,
        sentence: &str,
        results_json: &str,
        source_article_id: Option<i64>,
    ) -> Result<(), sqlx::Error> {
        let fallback_title = format!("[sentence cache] {}", preview(sentence));

        sqlx::query(
            r#"
            INSERT INTO sentence_analyses
                  (article_id, category, title, sentence_content, sentence_parse_results,
                   source_article_id, last_analysis_type, created_at, updated_at)
            VALUES ($1, 'sentence',
                    COALESCE((SELECT a.title || ' - sentence analysis'
                              FROM articles a WHERE a.id = $4), $2),
                    $3, $5, $4, 'parse', NOW(), NOW())
            ON CONFLICT (article_id) DO UPDATE
              SET sentence_parse_results = EXCLUDED.sentence_parse_results,
                  last_analysis_type     = EXCLUDED.last_analysis_type,
                  source_article_id      = COALESCE(EXCLUDED.source_article_id,
                                                    sentence_analyses.source_article_id),
                  title                  = EXCLUDED.title,
                  updated_at             = NOW()
            "#,
        )
        .bind(article_id)
        .bind(&fallback_title)
        .bind(sentence)
        .bind(source_article_id)
        .bind(results_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn preview(sentence: &str) -> String {
    let trimmed = sentence.trim();
    if trimmed.chars().count() <= TITLE_PREVIEW_CHARS {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(TITLE_PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}
