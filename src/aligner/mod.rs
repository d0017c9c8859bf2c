use crate::segmenter::{merge, paragraphs::Paragraphs, profile::LanguageProfile};
use tracing::debug;

/// How far (in characters) around the proportional estimate to look for a
/// punctuation cut point.
const SEARCH_RADIUS: usize = 200;
/// Segments shorter than this are not worth cutting out.
const MIN_SEGMENT_CHARS: usize = 30;
/// A punctuation mark only counts as a natural paragraph end when no other
/// mark follows within this many characters.
const NATURAL_BREAK_LOOKAHEAD: usize = 50;

/// Redistribute an unstructured translation so its paragraph boundaries
/// mirror the source text's, proportionally by length with punctuation-aware
/// refinement.
///
/// The cut points only partition the translated text: concatenating the
/// output paragraphs reproduces it verbatim. When the translation already
/// carries blank-line structure only the degenerate-paragraph cleanup runs,
/// and a source with fewer than two paragraphs leaves the translation as a
/// single block.
pub fn align(
    translated: &str,
    source: &Paragraphs,
    profile: &'static LanguageProfile,
) -> Paragraphs {
    if translated.is_empty() {
        return Paragraphs::default();
    }

    if translated.contains("\n\n") || translated.contains("\r\n\r\n") {
        debug!("translation already structured, merging short paragraphs only");
        let parts = Paragraphs::from_text(translated).into_vec();
        return Paragraphs::new(merge::merge_into_previous(parts, profile));
    }

    if source.len() < 2 {
        return Paragraphs::new(vec![translated.to_string()]);
    }

    let chars: Vec<char> = translated.chars().collect();
    let total_target = chars.len();
    let total_source: usize = source.iter().map(|p| p.chars().count()).sum();
    if total_source == 0 || total_target == 0 {
        return Paragraphs::new(vec![translated.to_string()]);
    }

    let natural_breaks = find_natural_breaks(&chars, profile);
    debug!(
        "aligning {} source paragraphs over {} target chars ({} natural breaks)",
        source.len(),
        total_target,
        natural_breaks.len()
    );

    let mut segments: Vec<String> = Vec::new();
    let mut cursor = 0usize;

    for paragraph in source.iter().take(source.len() - 1) {
        let ratio = paragraph.chars().count() as f64 / total_source as f64;
        let estimated = (total_target as f64 * ratio) as usize;
        let mut segment_end = (cursor + estimated).min(total_target.saturating_sub(1));

        let search_start = cursor.max(segment_end.saturating_sub(SEARCH_RADIUS));
        let search_end = (segment_end + SEARCH_RADIUS).min(total_target.saturating_sub(1));

        // Prefer the natural break nearest the estimated position.
        let mut cut = natural_breaks
            .iter()
            .copied()
            .filter(|&brk| {
                brk >= search_start && brk <= search_end && brk - cursor >= MIN_SEGMENT_CHARS
            })
            .min_by_key(|&brk| brk.abs_diff(segment_end));

        // Otherwise the nearest punctuation mark that still leaves a
        // reasonable segment.
        if cut.is_none() {
            cut = (search_start..=search_end)
                .filter(|&i| {
                    profile.paragraph_marks.contains(&chars[i])
                        && i + 1 - cursor >= MIN_SEGMENT_CHARS
                })
                .min_by_key(|&i| (i + 1).abs_diff(segment_end))
                .map(|i| i + 1);
        }

        // No acceptable punctuation: fall back to the raw estimate.
        if let Some(cut) = cut {
            segment_end = cut;
        }

        if segment_end > cursor {
            segments.push(chars[cursor..segment_end].iter().collect());
            cursor = segment_end;
        }
    }

    if cursor < total_target {
        segments.push(chars[cursor..].iter().collect());
    }

    let parts = merge::merge_short_paragraphs(segments, profile);
    Paragraphs::new(merge::merge_into_previous(parts, profile))
}

/// Positions just after punctuation marks that read as paragraph ends:
/// followed by whitespace, a digit, or an uppercase letter, with no further
/// punctuation crowding in right behind.
fn find_natural_breaks(chars: &[char], profile: &LanguageProfile) -> Vec<usize> {
    let mut breaks = Vec::new();
    for i in 0..chars.len() {
        if !profile.paragraph_marks.contains(&chars[i]) {
            continue;
        }
        let Some(&next) = chars.get(i + 1) else {
            continue;
        };
        if next.is_whitespace() || next.is_numeric() || next.is_uppercase() {
            let distance = chars[i + 1..]
                .iter()
                .position(|c| profile.paragraph_marks.contains(c));
            if distance.is_none_or(|d| d > NATURAL_BREAK_LOOKAHEAD) {
                breaks.push(i + 1);
            }
        }
    }
    breaks
}
