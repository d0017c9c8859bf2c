use crate::entities::Article;
use sqlx::PgPool;

const ARTICLE_COLUMNS: &str = "id, url, title, content, translation, lang, difficulty_level, \
                               word_count, status, created_at, updated_at";

/// Persistence for articles produced by the ingestion pipeline.
pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a freshly extracted article. Returns the new id, or `None`
    /// when the URL has been ingested before (the pipeline treats that as a
    /// skip, not an error).
    pub async fn insert(
        &self,
        url: &str,
        title: &str,
        content: &str,
        lang: Option<&str>,
        word_count: i32,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO articles (url, title, content, lang, word_count)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (url) DO NOTHING
             RETURNING id",
        )
        .bind(url)
        .bind(title)
        .bind(content)
        .bind(lang)
        .bind(word_count)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Article>, sqlx::Error> {
        sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_by_url(&self, url: &str) -> Result<Option<Article>, sqlx::Error> {
        sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE url = $1"
        ))
        .bind(url)
        .fetch_optional(&self.pool)
        .await
    }

    /// Store a finished translation and mark the article translated. The
    /// translation is written in one statement only after the whole
    /// operation succeeded; partial output never reaches this method.
    pub async fn store_translation(
        &self,
        id: i64,
        translation: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE articles
             SET translation = $2, status = 'translated', updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(translation)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Record the difficulty tag computed by the external evaluator. The
    /// value is opaque to this pipeline.
    pub async fn set_difficulty(&self, id: i64, level: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE articles SET difficulty_level = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(level)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Articles fetched but not yet translated, oldest first.
    pub async fn list_untranslated(&self, limit: i64) -> Result<Vec<Article>, sqlx::Error> {
        sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles
             WHERE status = 'fetched' ORDER BY created_at ASC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}
