pub mod merge;
pub mod paragraphs;
pub mod profile;

pub use paragraphs::{PARAGRAPH_SEPARATOR, Paragraphs};
pub use profile::{CHINESE, ENGLISH, LanguageProfile, profile_for};

use once_cell::sync::Lazy;
use regex::Regex;

/// Candidate paragraph boundaries, three tiers of decreasing confidence:
/// sentence punctuation + two spaces + capital, `!`/`?` + two spaces +
/// capital, and a plain period + single space + capital. Alternation order
/// matters: the regex engine tries tiers left to right at each position.
static SPLIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\.)\s{2,}([A-Z])|([!?])\s{2,}([A-Z])|(\.)\s([A-Z])").unwrap()
});

/// Minimum accumulated length before a tier-1 boundary (period + double
/// space) is allowed to end a paragraph.
const STRONG_BREAK_MIN_CHARS: usize = 100;
/// `!` and `?` are stronger semantic closers, so the bar is lower.
const EMPHATIC_BREAK_MIN_CHARS: usize = 80;
/// A period with a single space is usually just a sentence boundary; only
/// very long accumulations may break there.
const WEAK_BREAK_MIN_CHARS: usize = 150;

/// Split plain text into paragraphs.
///
/// Text that already contains blank-line paragraph breaks keeps its
/// structure and only gets degenerate-paragraph cleanup, which also makes
/// re-segmenting already-segmented text a no-op. Unstructured text goes
/// through the tiered punctuation scan, then the merge pass.
pub fn segment(text: &str, profile: &'static LanguageProfile) -> Paragraphs {
    let normalized = text.trim();
    if normalized.is_empty() {
        return Paragraphs::default();
    }

    if normalized.contains("\n\n") || normalized.contains("\r\n\r\n") {
        let parts = Paragraphs::from_text(normalized).into_vec();
        return Paragraphs::new(merge::merge_into_previous(parts, profile));
    }

    let parts = structural_split(normalized);
    let parts = merge::merge_short_paragraphs(parts, profile);
    let parts = merge::merge_into_previous(parts, profile);
    Paragraphs::new(parts)
}

/// The tiered boundary scan. A boundary only takes effect when the text
/// accumulated since the last accepted split reaches the tier's threshold;
/// otherwise the sentence is folded into the running paragraph (whitespace
/// at the rejected boundary collapses to a single space).
fn structural_split(text: &str) -> Vec<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut last_end = 0usize;

    for caps in SPLIT_RE.captures_iter(text) {
        let (punct, capital, threshold) = if let (Some(p), Some(c)) = (caps.get(1), caps.get(2)) {
            (p, c, STRONG_BREAK_MIN_CHARS)
        } else if let (Some(p), Some(c)) = (caps.get(3), caps.get(4)) {
            (p, c, EMPHATIC_BREAK_MIN_CHARS)
        } else {
            let p = caps.get(5).expect("tier-3 punctuation group");
            let c = caps.get(6).expect("tier-3 capital group");
            (p, c, WEAK_BREAK_MIN_CHARS)
        };

        current.push_str(&text[last_end..punct.end()]);

        if current.chars().count() >= threshold {
            paragraphs.push(std::mem::take(&mut current));
        } else {
            current.push(' ');
        }

        current.push_str(capital.as_str());
        last_end = capital.end();
    }

    current.push_str(&text[last_end..]);
    if !current.trim().is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}
