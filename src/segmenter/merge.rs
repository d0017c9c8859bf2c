use crate::segmenter::profile::LanguageProfile;

/// Simple cleanup for text that already carries paragraph structure: fold
/// every short paragraph (except a leading one) into its predecessor.
///
/// Postcondition: no paragraph after the first is short, which is what makes
/// re-segmenting already-segmented text a no-op.
pub fn merge_into_previous(paragraphs: Vec<String>, profile: &LanguageProfile) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for paragraph in paragraphs {
        if paragraph.is_empty() {
            continue;
        }
        if profile.is_short(&paragraph) && !out.is_empty() {
            let last = out.pop().unwrap();
            out.push(profile.join(&last, &paragraph));
        } else {
            out.push(paragraph);
        }
    }
    out
}

/// Full cleanup pass applied after heuristic splitting: short paragraphs are
/// merged into the shorter of their neighbors, and adjacent "run-on"
/// paragraphs (one long mis-split sentence each) are merged with each other.
///
/// A short paragraph whose following neighbor is the better merge target is
/// kept pending and absorbed when that neighbor is processed.
pub fn merge_short_paragraphs(
    paragraphs: Vec<String>,
    profile: &LanguageProfile,
) -> Vec<String> {
    let count = paragraphs.len();
    let mut merged: Vec<String> = Vec::new();

    for (i, paragraph) in paragraphs.iter().enumerate() {
        if paragraph.is_empty() {
            continue;
        }

        if profile.is_short(paragraph) {
            if !merged.is_empty() && i + 1 < count {
                let prev_size = profile.measure(merged.last().unwrap());
                let next_size = profile.measure(&paragraphs[i + 1]);
                if prev_size <= next_size {
                    let last = merged.pop().unwrap();
                    merged.push(profile.join(&last, paragraph));
                } else {
                    // The next paragraph is the shorter neighbor; leave this
                    // one pending for the lookback below.
                    merged.push(paragraph.clone());
                }
            } else if !merged.is_empty() {
                let last = merged.pop().unwrap();
                merged.push(profile.join(&last, paragraph));
            } else {
                merged.push(paragraph.clone());
            }
        } else if profile.is_run_on(paragraph) {
            match merged.last() {
                Some(last) if profile.is_run_on(last) => {
                    let last = merged.pop().unwrap();
                    merged.push(profile.join(&last, paragraph));
                }
                _ => merged.push(paragraph.clone()),
            }
        } else {
            match merged.last() {
                Some(last) if profile.is_short(last) => {
                    let last = merged.pop().unwrap();
                    merged.push(profile.join(&last, paragraph));
                }
                _ => merged.push(paragraph.clone()),
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::profile::{CHINESE, ENGLISH};

    fn long_en(tag: &str) -> String {
        format!(
            "{tag} paragraph with enough separate words that the segmenter will treat it \
             as a full paragraph on its own merits."
        )
    }

    #[test]
    fn merge_into_previous_folds_short_tail() {
        let paras = vec![long_en("First"), "A short tail.".to_string()];
        let merged = merge_into_previous(paras, &ENGLISH);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].ends_with("A short tail."));
    }

    #[test]
    fn merge_into_previous_keeps_short_leading_paragraph() {
        let paras = vec!["Short lead.".to_string(), long_en("Second")];
        let merged = merge_into_previous(paras, &ENGLISH);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_into_previous_is_idempotent() {
        let paras = vec![
            long_en("First"),
            "Tiny.".to_string(),
            long_en("Third"),
        ];
        let once = merge_into_previous(paras, &ENGLISH);
        let twice = merge_into_previous(once.clone(), &ENGLISH);
        assert_eq!(once, twice);
    }

    #[test]
    fn short_paragraph_joins_the_shorter_neighbor() {
        let prev = long_en("Previous");
        let next = format!("{} {}", long_en("Next"), long_en("Continued"));
        let short = "Stub sentence.".to_string();

        // prev is smaller than next, so the stub folds backward.
        let merged = merge_short_paragraphs(
            vec![prev.clone(), short.clone(), next.clone()],
            &ENGLISH,
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], format!("{prev} {short}"));
        assert_eq!(merged[1], next);
    }

    #[test]
    fn pending_short_paragraph_folds_forward() {
        let prev = format!("{} {}", long_en("Previous"), long_en("Extended"));
        let next = long_en("Next");
        let short = "Stub sentence.".to_string();

        // prev is larger than next, so the stub waits and joins the next
        // paragraph instead.
        let merged = merge_short_paragraphs(
            vec![prev.clone(), short.clone(), next.clone()],
            &ENGLISH,
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], prev);
        assert_eq!(merged[1], format!("{short} {next}"));
    }

    #[test]
    fn adjacent_run_on_paragraphs_merge() {
        let a = format!(
            "{} without any closing punctuation to speak of for quite a while end.",
            "a very long single sentence that keeps going and going".repeat(3)
        );
        let b = format!(
            "{} also without internal stops until the very end.",
            "another equally long clause chain that refuses to terminate".repeat(3)
        );
        assert!(ENGLISH.is_run_on(&a));
        assert!(ENGLISH.is_run_on(&b));

        let merged = merge_short_paragraphs(vec![a.clone(), b.clone()], &ENGLISH);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0], format!("{a} {b}"));
    }

    #[test]
    fn chinese_merge_uses_char_threshold_and_no_join_space() {
        let long = "这一段中文内容足够长，能够独立成段，因为它的字符数量超过了最低限制，并且包含了完整的句子结构。".to_string();
        let short = "短句。".to_string();
        let merged = merge_into_previous(vec![long.clone(), short.clone()], &CHINESE);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0], format!("{long}{short}"));
    }
}
