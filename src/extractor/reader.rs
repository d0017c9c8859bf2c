use readability::extractor;
use scraper::{Html, Selector};
use url::Url;

#[derive(Debug)]
pub struct ReadabilityResult {
    pub title: String,
    pub text: String,
}

/// Below this many characters the readability output is suspect (teaser text,
/// paywall stub) and the selector fallback gets a chance to do better.
const READABILITY_MIN_CHARS: usize = 500;

/// Containers news CMSes commonly put the article body in, tried in order.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".article-content",
    ".post-content",
    ".entry-content",
    ".content",
    ".main-content",
    "[role='main']",
    ".story-body",
    ".article-body",
];

const FALLBACK_MIN_CHARS: usize = 200;

pub fn extract(html: &str, url: &Url) -> Option<ReadabilityResult> {
    let document = Html::parse_document(html);

    let (mut title, mut text) = match extractor::extract(&mut html.as_bytes(), url) {
        Ok(article) => (article.title, article.text),
        Err(_) => (String::new(), String::new()),
    };

    // Readability sometimes returns only a teaser; keep whichever strategy
    // recovered more of the body.
    if text.chars().count() < READABILITY_MIN_CHARS
        && let Some(fallback) = fallback_content(&document)
        && fallback.chars().count() > text.chars().count()
    {
        text = fallback;
    }

    if text.trim().is_empty() {
        return None;
    }

    if title.trim().is_empty() {
        title = extract_title(&document).unwrap_or_default();
    }

    Some(ReadabilityResult { title, text })
}

fn fallback_content(document: &Html) -> Option<String> {
    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let text = element.text().collect::<String>();
                if text.trim().chars().count() > FALLBACK_MIN_CHARS {
                    return Some(text);
                }
            }
        }
    }

    // Last resort: the whole body
    let body_selector = Selector::parse("body").ok()?;
    let body = document.select(&body_selector).next()?;
    let text = body.text().collect::<String>();
    if text.trim().chars().count() > FALLBACK_MIN_CHARS {
        Some(text)
    } else {
        None
    }
}

fn extract_title(document: &Html) -> Option<String> {
    // og:title first, it's usually the cleanest
    if let Ok(selector) = Selector::parse("meta[property='og:title']") {
        for element in document.select(&selector) {
            if let Some(content) = element.value().attr("content") {
                return Some(content.to_string());
            }
        }
    }

    if let Ok(selector) = Selector::parse("title") {
        for element in document.select(&selector) {
            let title = element.text().collect::<String>().trim().to_string();
            if !title.is_empty() {
                return Some(title);
            }
        }
    }

    if let Ok(selector) = Selector::parse("h1") {
        for element in document.select(&selector) {
            let title = element.text().collect::<String>().trim().to_string();
            if !title.is_empty() {
                return Some(title);
            }
        }
    }

    None
}
