use once_cell::sync::Lazy;
use regex::Regex;

/// How "too short to stand alone" is measured for a paragraph: English is
/// word-based, Chinese is character-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortLimit {
    Words(usize),
    Chars(usize),
}

/// Immutable per-language punctuation tables and thresholds, injected into
/// the segmenter, aligner, and chunk splitter instead of living as shared
/// globals. The numeric thresholds are empirically tuned; treat them as
/// configuration, not derived values.
pub struct LanguageProfile {
    pub code: &'static str,
    /// Characters that terminate a sentence.
    pub sentence_enders: &'static [char],
    /// Clause-level separators (commas).
    pub clause_marks: &'static [char],
    /// Characters a translation chunk may end on.
    pub chunk_breaks: &'static [char],
    /// Characters the aligner accepts as paragraph cut points.
    pub paragraph_marks: &'static [char],
    /// Minimum size for a paragraph to stand alone.
    pub short_limit: ShortLimit,
    /// Separator inserted when two paragraphs are merged.
    pub merge_join: &'static str,
    run_on: fn(&str) -> bool,
}

impl LanguageProfile {
    /// Paragraph size in this language's natural unit (words or chars),
    /// used to pick the shorter neighbor when merging.
    pub fn measure(&self, paragraph: &str) -> usize {
        match self.short_limit {
            ShortLimit::Words(_) => count_words(paragraph),
            ShortLimit::Chars(_) => paragraph.chars().count(),
        }
    }

    pub fn is_short(&self, paragraph: &str) -> bool {
        match self.short_limit {
            ShortLimit::Words(limit) => count_words(paragraph) < limit,
            ShortLimit::Chars(limit) => paragraph.chars().count() < limit,
        }
    }

    /// A paragraph that is really one long mis-split sentence rather than a
    /// true paragraph.
    pub fn is_run_on(&self, paragraph: &str) -> bool {
        if paragraph.is_empty() {
            return false;
        }
        (self.run_on)(paragraph)
    }

    pub fn count_sentence_enders(&self, text: &str) -> usize {
        text.chars()
            .filter(|c| self.sentence_enders.contains(c))
            .count()
    }

    pub fn join(&self, left: &str, right: &str) -> String {
        format!("{left}{}{right}", self.merge_join)
    }
}

pub static ENGLISH: LanguageProfile = LanguageProfile {
    code: "en",
    sentence_enders: &['.', '?', '!'],
    clause_marks: &[','],
    chunk_breaks: &['.', '?', '!', ';', '"', '\'', ','],
    paragraph_marks: &['.', '?', '!', ';'],
    short_limit: ShortLimit::Words(15),
    merge_join: " ",
    run_on: english_run_on,
};

pub static CHINESE: LanguageProfile = LanguageProfile {
    code: "zh",
    sentence_enders: &['。', '？', '！', '.', '?', '!'],
    clause_marks: &['，', ','],
    chunk_breaks: &['。', '？', '！', '；', '…', '，', '.', '?', '!', ';', ','],
    paragraph_marks: &['。', '？', '！', '.', '?', '!', '；', '…'],
    short_limit: ShortLimit::Chars(50),
    merge_join: "",
    run_on: chinese_run_on,
};

pub fn profile_for(lang: &str) -> &'static LanguageProfile {
    match lang {
        "zh" => &CHINESE,
        _ => &ENGLISH,
    }
}

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

pub fn count_words(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

/// An English paragraph with at most a couple of sentence enders relative to
/// its length usually indicates a mis-split long sentence.
fn english_run_on(paragraph: &str) -> bool {
    let enders = ENGLISH.count_sentence_enders(paragraph);
    let length = paragraph.chars().count();
    let words = count_words(paragraph);
    let avg_sentence_words = if enders > 0 {
        words as f64 / enders as f64
    } else {
        words as f64
    };

    (enders <= 1 && length < 300)
        || (enders > 0 && length / enders > 150)
        || (enders <= 2 && avg_sentence_words > 30.0)
        || (enders > 0 && words / enders > 25)
        || (length > 200 && enders <= 2)
}

/// Chinese counterpart: long comma chains without sentence enders mark a
/// clause run rather than a paragraph.
fn chinese_run_on(paragraph: &str) -> bool {
    let enders = CHINESE.count_sentence_enders(paragraph);
    let length = paragraph.chars().count();
    let commas = paragraph
        .chars()
        .filter(|c| CHINESE.clause_marks.contains(c))
        .count();

    (enders <= 1 && length < 250)
        || (enders > 0 && length / enders > 120)
        || (enders > 0 && enders <= 2 && commas / enders > 5)
        || (length > 150 && enders <= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_words() {
        assert_eq!(count_words("The quick brown fox."), 4);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn english_short_limit_is_word_based() {
        assert!(ENGLISH.is_short("Just a few words here."));
        let long = "word ".repeat(20);
        assert!(!ENGLISH.is_short(&long));
    }

    #[test]
    fn chinese_short_limit_is_char_based() {
        assert!(CHINESE.is_short("很短的段落。"));
        let long = "这是一个足够长的中文段落".repeat(5);
        assert!(!CHINESE.is_short(&long));
    }

    #[test]
    fn detects_english_run_on_paragraph() {
        // One very long sentence, no internal enders until the end.
        let run_on = format!("{} end.", "the committee that was formed last year to review the many overlapping proposals".repeat(3));
        assert!(ENGLISH.is_run_on(&run_on));

        let normal = "First sentence is here. Second one follows. A third closes it. \
                      Then two more short ones. And another. Plus a final one to be safe.";
        assert!(!ENGLISH.is_run_on(normal));
    }

    #[test]
    fn detects_chinese_comma_chain() {
        let chain = "委员会认为，该提案涉及多个部门，包括教育，医疗，交通，住房，环境，以及其他领域，需要进一步协调。";
        assert!(CHINESE.is_run_on(chain));
    }

    #[test]
    fn profile_lookup_defaults_to_english() {
        assert_eq!(profile_for("zh").code, "zh");
        assert_eq!(profile_for("en").code, "en");
        assert_eq!(profile_for("fr").code, "en");
    }
}
