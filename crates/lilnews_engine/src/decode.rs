use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into the document a `<meta charset>` declaration is looked for.
const META_SNIFF_LEN: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: String,
    /// True when malformed sequences were replaced with U+FFFD.
    pub lossy: bool,
}

/// Decode page bytes into UTF-8.
///
/// Order: BOM, `Content-Type` charset, `<meta charset>` near the top, then
/// chardetng detection. Malformed input is decoded lossily.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> DecodedPage {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    let declared = content_type
        .and_then(charset_param)
        .or_else(|| meta_charset(bytes))
        .and_then(|label| Encoding::for_label(label.as_bytes()));
    if let Some(encoding) = declared {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let meta_start = head.find("<meta")?;
    let after = &head[meta_start..];
    let value_start = after.find("charset=")? + "charset=".len();
    let value = after[value_start..].trim_start_matches(['"', '\'']);
    let end = value
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(value.len());
    (end > 0).then(|| value[..end].to_string())
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedPage {
    let (text, used, lossy) = encoding.decode(bytes);
    DecodedPage {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        lossy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_param_is_case_insensitive_and_unquoted() {
        assert_eq!(
            charset_param("text/html; Charset=\"ISO-8859-1\""),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(charset_param("text/html"), None);
    }

    #[test]
    fn meta_charset_is_sniffed() {
        let html = br#"<html><head><meta charset="windows-1252"></head></html>"#;
        assert_eq!(meta_charset(html), Some("windows-1252".to_string()));
        assert_eq!(meta_charset(b"<html><head></head></html>"), None);
    }

    #[test]
    fn meta_charset_decodes_without_header() {
        let mut html = br#"<meta charset="iso-8859-1"><p>caf"#.to_vec();
        html.push(0xe9);
        let decoded = decode_page(&html, None);
        assert!(decoded.html.ends_with("café"));
        assert!(!decoded.lossy);
    }

    #[test]
    fn malformed_utf8_is_decoded_lossily() {
        let decoded = decode_page(b"ok \xff\xfe!", Some("text/html; charset=utf-8"));
        assert!(decoded.lossy);
        assert!(decoded.html.starts_with("ok "));
    }
}
