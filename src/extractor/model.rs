use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Plain article text that survived extraction and cleaning, ready for
/// segmentation and storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    pub url: Url,
    pub title: String,
    pub language: Option<String>,
    pub text: String,
    pub word_count: usize,
    pub fetched_at: DateTime<Utc>,
}

pub fn normalize_whitespace(text: &str) -> String {
    let text = text.trim();

    // Replace runs of spaces/tabs with a single space
    let space_regex = regex::Regex::new(r"[ \t]+").unwrap();
    let spaced = space_regex.replace_all(text, " ");

    // Collapse consecutive blank lines into one paragraph break
    let newline_regex = regex::Regex::new(r"\n\s*\n+").unwrap();
    newline_regex.replace_all(&spaced, "\n\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_spaces_and_blank_lines() {
        let text = "  First    paragraph  \n\n\n  Second paragraph  ";
        assert_eq!(
            normalize_whitespace(text),
            "First paragraph \n\n Second paragraph"
        );
    }

    #[test]
    fn leaves_clean_text_alone() {
        let text = "One paragraph.\n\nAnother paragraph.";
        assert_eq!(normalize_whitespace(text), text);
    }
}
