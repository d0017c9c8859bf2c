use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// --- PostgreSQL Enums ---

#[derive(sqlx::Type, Debug, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "article_status", rename_all = "lowercase")]
pub enum ArticleStatus {
    Fetched,
    Translated,
}

/// --- Tables ---

/// A stored news article. `content` and `translation` both carry blank-line
/// paragraph separators; `id` is always positive, which keeps the namespace
/// disjoint from negative virtual sentence identifiers.
#[derive(Debug, Clone, FromRow)]
pub struct Article {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub content: String,
    pub translation: Option<String>,
    pub lang: Option<String>,
    pub difficulty_level: Option<String>, // opaque tag from the external evaluator
    pub word_count: i32,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A cached AI analysis, keyed by either a real (positive) article id or a
/// virtual (negative) sentence id. Analysis payloads are stored as serialized
/// JSON text; the cache never interprets them.
#[derive(Debug, Clone, FromRow)]
pub struct AnalysisRecord {
    pub article_id: i64,
    pub category: String, // "article" or "sentence"
    pub title: Option<String>,
    pub sentence_content: Option<String>,
    pub sentence_parse_results: Option<String>,
    pub source_article_id: Option<i64>,
    pub last_analysis_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
