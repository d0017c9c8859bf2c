use std::cmp::Ordering;

/// Canonical form used for hashing: identical sentences that differ only in
/// case or surrounding whitespace share one cache entry.
pub fn normalize_sentence(sentence: &str) -> String {
    sentence.trim().to_lowercase()
}

/// Deterministic virtual identifier for a sentence: the first 8 bytes of the
/// MD5 digest of the normalized text, read as a signed big-endian integer
/// and forced negative. Real article ids are positive, so the two key
/// spaces can never collide.
pub fn virtual_sentence_id(sentence: &str) -> i64 {
    let digest = md5::compute(normalize_sentence(sentence).as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.0[..8]);
    let value = i64::from_be_bytes(prefix);
    match value.cmp(&0) {
        Ordering::Greater => -value,
        Ordering::Equal => -1,
        Ordering::Less => value,
    }
}
