use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// If cleaning leaves fewer characters than this, the pattern ate real
/// content and the original text is restored.
const OVERCLEAN_GUARD_CHARS: usize = 30;

/// Leading boilerplate seen on syndicated news articles, most specific first.
/// The first matching pattern wins and scanning stops.
static PREFIX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // AP wire format: Updated hh:mm AM/PM TZ, Month Day, Year WASHINGTON (AP) —
        r"(?i)^Updated\s+\d{1,2}:\d{2}\s+[AP]M\s+[A-Z]+,\s+[A-Za-z]+\s+\d{1,2},\s+\d{4}\s+[A-Z\s()]+\s*—\s+",
        // Month Day, Year WASHINGTON (AP) —
        r"(?i)^[A-Za-z]+\s+\d{1,2},\s+\d{4}\s+[A-Z\s()]+\s*—\s+",
        // January 15, 2024 at 2:30 PM EST
        r"(?i)^[A-Za-z]+\s+\d{1,2},\s+\d{4}\s+at\s+\d{1,2}:\d{2}\s+[AP]M\s+[A-Z]+\s*—?\s*",
        // By John Smith, Staff Writer | January 15, 2024
        r"(?i)^By\s+[A-Za-z\s]+,\s*[A-Za-z\s]+\s*\|\s*[A-Za-z]+\s+\d{1,2},\s+\d{4}\s*—?\s*",
        // By John Smith — capitalized name words only, so prose that merely
        // starts with the word "By" is left alone
        r"^By\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3}\s*—?\s*",
        // Agency branding
        r"(?i)^(CNN|BBC|Reuters|AFP|AP|Associated Press|Breaking News)\s*—\s*",
        // Social sharing widgets flattened into text
        r"(?i)^(Share on|Tweet this|Follow us|Like us)\s+[A-Za-z\s|]+\s*—?\s*",
        // Ad markers
        r"(?i)^(Advertisement|Sponsored Content|Sponsored|Promoted)\b\s*[—:|-]?\s*",
        // Navigation crumbs: Home | News | Sports
        r"(?i)^(Home|News|Sports|Entertainment|Business|Technology)\s*\|\s*[A-Za-z\s|]+\s*—?\s*",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Trailing boilerplate. Only matched inside the final 20% of the text so a
/// mid-article mention of "subscribe" never truncates the body.
static SUFFIX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\s*©\s*\d{4}\s+[A-Za-z\s\.]+\s+All rights reserved\..*$",
        r"(?i)\s*Copyright\s+©\s*\d{4}\s+[A-Za-z\s\.]+.*$",
        r"(?i)\s*(Related Articles|More from|You might also like|Recommended for you|Also read)\b.*$",
        r"(?i)\s*(Follow us|Like us|Share this|Tweet this)\s+[A-Za-z\s|]+.*$",
        r"(?i)\s*(Leave a comment|Join the discussion|Add your comment)\b.*$",
        r"(?i)\s*(Advertisement|Sponsored by)\s+[A-Za-z\s]+.*$",
        r"(?i)\s*(About us|Contact us|Privacy Policy|Terms of Service|Disclaimer)\b.*$",
        r"(?i)\s*(About the author|Author bio)\b.*$",
        r"(?i)\s*(Originally published|First published)\b.*$",
        r"(?i)\s*(Tags|Categories|Filed under)\s*:\s*[A-Za-z\s,]+.*$",
        r"(?i)\s*(Share this article|Print this article|Email this article)\b.*$",
        r"(?i)\s*(Subscribe to our|Sign up for our|Get updates)\b.*$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LEADING_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[—\-\|]+\s*").unwrap());
static TRAILING_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[—\-\|]+\s*$").unwrap());

/// Strip a leading dateline/byline/agency prefix. Text without a recognized
/// prefix passes through unchanged.
pub fn clean_prefix(content: &str) -> String {
    if content.is_empty() {
        return content.to_string();
    }

    let mut cleaned = content.to_string();

    for pattern in PREFIX_PATTERNS.iter() {
        if let Some(m) = pattern.find(&cleaned) {
            debug!("stripping article prefix: {:?}", m.as_str());
            cleaned = cleaned[m.end()..].to_string();
            break;
        }
    }

    cleaned = LEADING_DASHES.replace(&cleaned, "").to_string();
    cleaned = cleaned.trim_start().to_string();

    if cleaned.trim().chars().count() < OVERCLEAN_GUARD_CHARS {
        debug!("prefix cleaning removed too much, keeping original");
        return content.to_string();
    }

    cleaned
}

/// Strip trailing copyright/social/related-content boilerplate from the tail
/// of an article.
pub fn clean_suffix(content: &str) -> String {
    if content.is_empty() {
        return content.to_string();
    }

    let char_count = content.chars().count();
    let window_chars = char_count.saturating_sub(char_count / 5);
    let window_start = content
        .char_indices()
        .nth(window_chars)
        .map(|(i, _)| i)
        .unwrap_or(content.len());
    let end_section = &content[window_start..];

    let mut cleaned = content.to_string();
    for pattern in SUFFIX_PATTERNS.iter() {
        if let Some(m) = pattern.find(end_section) {
            debug!("stripping article suffix: {:?}", m.as_str().trim());
            cleaned = content[..window_start + m.start()].to_string();
            break;
        }
    }

    cleaned = TRAILING_DASHES.replace(&cleaned, "").to_string();
    cleaned = cleaned.trim_end().to_string();

    if cleaned.trim().chars().count() < OVERCLEAN_GUARD_CHARS {
        debug!("suffix cleaning removed too much, keeping original");
        return content.to_string();
    }

    cleaned
}
