/// Split text into translation chunks of at most `limit` characters.
///
/// Each cut scans backward from the chunk's capacity boundary for the
/// nearest break character, but only accepts it past the chunk midpoint so
/// chunks stay reasonably full. When no break qualifies the chunk is cut
/// hard at the limit. Chunks partition the input: concatenating them in
/// order reproduces it exactly.
pub fn split_chunks(text: &str, limit: usize, break_chars: &[char]) -> Vec<String> {
    assert!(limit > 0, "chunk limit must be positive");

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < chars.len() {
        let capacity_end = (start + limit).min(chars.len());
        if capacity_end == chars.len() {
            chunks.push(chars[start..].iter().collect());
            break;
        }

        let midpoint = start + limit / 2;
        let cut = (midpoint..capacity_end)
            .rev()
            .find(|&i| break_chars.contains(&chars[i]))
            .map(|i| i + 1)
            .unwrap_or(capacity_end);

        chunks.push(chars[start..cut].iter().collect());
        start = cut;
    }

    chunks
}
