use crate::fetcher::{
    errors::FetchError,
    types::{Charset, RawDocument},
};
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Turn a raw HTTP body into a decoded [`RawDocument`]. News sources are
/// inconsistent about declaring their encoding, so the charset is sniffed
/// from the header, the markup, and finally byte-level heuristics.
pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: &str,
) -> Result<RawDocument, FetchError> {
    let charset = detect_charset(content_type, &body_bytes)?;
    let html = decode_to_utf8(&body_bytes, &charset)?;

    Ok(RawDocument {
        url_final,
        status,
        html,
        charset,
        fetched_at: Utc::now(),
    })
}

fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Result<Charset, FetchError> {
    // 1. Check Content-Type header for charset
    if let Some(captures) = CHARSET_REGEX.captures(content_type)
        && let Some(charset_str) = captures.get(1)
    {
        let charset_name = charset_str.as_str().to_lowercase();
        if let Some(encoding) = Encoding::for_label(charset_name.as_bytes()) {
            return Ok(Charset::from_encoding(encoding));
        }
    }

    // 2. Check for <meta charset> in first 4KB
    let search_bytes = &body_bytes[..body_bytes.len().min(4096)];
    let search_str = String::from_utf8_lossy(search_bytes);

    for regex in [&*META_CHARSET_REGEX, &*META_HTTP_EQUIV_REGEX] {
        if let Some(captures) = regex.captures(&search_str)
            && let Some(charset_str) = captures.get(1)
        {
            let charset_name = charset_str.as_str().to_lowercase();
            if let Some(encoding) = Encoding::for_label(charset_name.as_bytes()) {
                return Ok(Charset::from_encoding(encoding));
            }
        }
    }

    // 3. Fall back to byte-level heuristic detection
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    let detected = detector.guess(None, true);

    Ok(Charset::from_encoding(detected))
}

fn decode_to_utf8(body_bytes: &[u8], charset: &Charset) -> Result<String, FetchError> {
    let encoding = match charset {
        Charset::Utf8 => encoding_rs::UTF_8,
        Charset::Latin1 | Charset::Iso88591 => encoding_rs::WINDOWS_1252,
        Charset::Windows1252 => encoding_rs::WINDOWS_1252,
        Charset::ShiftJis => encoding_rs::SHIFT_JIS,
        Charset::Gb2312 => encoding_rs::GBK,
        Charset::Big5 => encoding_rs::BIG5,
        Charset::Other(name) => Encoding::for_label(name.as_bytes()).unwrap_or(encoding_rs::UTF_8),
    };

    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        return Err(FetchError::Charset(format!(
            "failed to decode content with encoding: {}",
            encoding.name()
        )));
    }

    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_charset_from_content_type() {
        let content_type = "text/html; charset=utf-8";
        let body = b"<html><head><title>Test</title></head></html>";

        let charset = detect_charset(content_type, body).unwrap();
        assert!(matches!(charset, Charset::Utf8));
    }

    #[test]
    fn detects_charset_from_meta_tag() {
        let content_type = "text/html";
        let body = b"<html><head><meta charset=\"iso-8859-1\"><title>Test</title></head></html>";

        let charset = detect_charset(content_type, body).unwrap();
        // ISO-8859-1 gets mapped to Windows1252 by encoding_rs since it's a superset
        assert!(matches!(charset, Charset::Windows1252));
    }

    #[test]
    fn detects_charset_from_meta_http_equiv() {
        let content_type = "text/html";
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=gb2312\"><title>Test</title></head></html>";

        let charset = detect_charset(content_type, body).unwrap();
        assert!(matches!(charset, Charset::Gb2312));
    }

    #[test]
    fn decodes_utf8_body() {
        let body = "Breaking: 世界新闻!".as_bytes();
        let charset = Charset::Utf8;

        let decoded = decode_to_utf8(body, &charset).unwrap();
        assert_eq!(decoded, "Breaking: 世界新闻!");
    }

    #[test]
    fn process_response_stamps_fetch_time() {
        let url = Url::parse("https://news.example.com/story").unwrap();
        let body = Bytes::from_static(b"<html><body>A short story body.</body></html>");
        let doc =
            process_response(url.clone(), StatusCode::OK, body, "text/html; charset=utf-8")
                .unwrap();

        assert_eq!(doc.url_final, url);
        assert!(doc.html.contains("A short story body."));
        assert!(matches!(doc.charset, Charset::Utf8));
    }
}
