pub mod language;
pub mod model;
pub mod prefix;
pub mod reader;
pub mod validate;

pub use model::ExtractedText;

use crate::fetcher::types::RawDocument;
use thiserror::Error;
use tracing::debug;

/// Anything shorter than this after cleaning is an extraction failure, not a
/// short article: the URL gets skipped instead of storing degenerate content.
pub const MIN_CONTENT_CHARS: usize = 100;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no readable content found in document")]
    Unreadable,

    #[error("extracted text too short ({0} chars)")]
    TooShort(usize),

    #[error("extracted text failed content validation")]
    Rejected,
}

/// Extract the main article text from a fetched page: readability pass,
/// dateline/boilerplate cleaning, then quality validation.
pub fn extract(doc: &RawDocument) -> Result<ExtractedText, ExtractError> {
    let result = reader::extract(&doc.html, &doc.url_final).ok_or(ExtractError::Unreadable)?;

    let text = prefix::clean_prefix(&result.text);
    let text = prefix::clean_suffix(&text);
    let text = model::normalize_whitespace(&text);

    let char_count = text.chars().count();
    if char_count < MIN_CONTENT_CHARS {
        return Err(ExtractError::TooShort(char_count));
    }

    if !validate::is_valid_article(&text) {
        return Err(ExtractError::Rejected);
    }

    let language = language::detect_language(&text);
    let word_count = crate::segmenter::profile::count_words(&text);
    debug!(
        "extracted {} chars / {} words from {}",
        char_count, word_count, doc.url_final
    );

    Ok(ExtractedText {
        url: doc.url_final.clone(),
        title: result.title,
        language,
        text,
        word_count,
        fetched_at: doc.fetched_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::types::{Charset, RawDocument};
    use chrono::Utc;
    use url::Url;

    fn doc(html: &str) -> RawDocument {
        RawDocument {
            url_final: Url::parse("https://news.example.com/story").unwrap(),
            status: reqwest::StatusCode::OK,
            html: html.to_string(),
            charset: Charset::Utf8,
            fetched_at: Utc::now(),
        }
    }

    fn article_html(body: &str) -> String {
        // No heading inside <article>: these tests assert on the exact
        // start of the extracted text.
        format!(
            "<html><head><title>Test Story</title></head><body>\
             <nav>Home | News | Sports</nav>\
             <article><p>{body}</p></article>\
             </body></html>"
        )
    }

    #[test]
    fn extracts_article_body() {
        let body = "Officials said the new policy, announced on Tuesday, would reshape how \
                    the agency reviews applications. According to the report, more than two \
                    thousand cases are pending and reviewers expect the backlog to persist \
                    through the end of the year despite the additional funding."
            .repeat(2);
        let extracted = extract(&doc(&article_html(&body))).unwrap();

        assert!(extracted.text.contains("Officials said the new policy"));
        assert!(extracted.word_count > 50);
        assert_eq!(extracted.language.as_deref(), Some("en"));
    }

    #[test]
    fn short_result_is_a_failure_not_a_short_article() {
        let err = extract(&doc(&article_html("Too short to keep."))).unwrap_err();
        assert!(matches!(err, ExtractError::TooShort(_) | ExtractError::Unreadable));
    }

    #[test]
    fn strips_dateline_prefix() {
        let body = "March 4, 2025 WASHINGTON (AP) — Lawmakers reached an agreement late \
                    Monday on the spending package, according to aides familiar with the \
                    negotiations who spoke on condition of anonymity. The deal would keep \
                    agencies funded through September and sets up a vote later this week. \
                    Leaders in both chambers said they expected the measure to pass.";
        let extracted = extract(&doc(&article_html(body))).unwrap();
        assert!(extracted.text.starts_with("Lawmakers reached"));
    }
}
