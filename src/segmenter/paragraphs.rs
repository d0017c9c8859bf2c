use serde::{Deserialize, Serialize};

/// Separator used in the persisted paragraph-structured form of a text.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// An ordered list of paragraphs. The persisted representation joins them
/// with blank lines; concatenating them with no separator reconstructs the
/// underlying text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Paragraphs {
    items: Vec<String>,
}

impl Paragraphs {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Parse blank-line-delimited text. Windows line endings are honored the
    /// same way as Unix ones; empty paragraphs are dropped.
    pub fn from_text(text: &str) -> Self {
        let items = if text.contains("\r\n\r\n") {
            text.split("\r\n\r\n")
        } else {
            text.split("\n\n")
        }
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
        Self { items }
    }

    pub fn to_text(&self) -> String {
        self.items.join(PARAGRAPH_SEPARATOR)
    }

    /// Concatenation with no separator; used to verify that segmentation
    /// and alignment never drop content.
    pub fn concatenated(&self) -> String {
        self.items.concat()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_blank_line_paragraphs() {
        let paras = Paragraphs::from_text("First one.\n\nSecond one.\n\n\n\nThird.");
        assert_eq!(paras.as_slice(), ["First one.", "Second one.", "Third."]);
    }

    #[test]
    fn parses_windows_line_endings() {
        let paras = Paragraphs::from_text("First one.\r\n\r\nSecond one.");
        assert_eq!(paras.len(), 2);
    }

    #[test]
    fn text_without_breaks_is_one_paragraph() {
        let paras = Paragraphs::from_text("Just one block of text.");
        assert_eq!(paras.len(), 1);
    }

    #[test]
    fn round_trips_through_text_form() {
        let paras = Paragraphs::new(vec!["One.".into(), "Two.".into()]);
        assert_eq!(Paragraphs::from_text(&paras.to_text()), paras);
    }
}
