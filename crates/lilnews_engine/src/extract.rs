use scraper::{Html, Selector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub content_html: String,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedContent;
}

/// Containers tried in order; the first match wins, then `<body>`, then the
/// whole document.
const CONTENT_SELECTORS: &[&str] = &["article", "main", "[role=main]", "body"];

/// Lightweight "readability-like" extractor for the reader view.
///
/// The title comes from `og:title` when present, otherwise `<title>`.
#[derive(Debug, Default)]
pub struct ReadabilityLikeExtractor;

impl Extractor for ReadabilityLikeExtractor {
    fn extract(&self, html: &str) -> ExtractedContent {
        let doc = Html::parse_document(html);

        let title = og_title(&doc).or_else(|| select_text(&doc, "title"));

        let content_html = CONTENT_SELECTORS
            .iter()
            .filter_map(|css| Selector::parse(css).ok())
            .find_map(|sel| doc.select(&sel).next().map(|node| node.inner_html()))
            .unwrap_or_else(|| doc.root_element().html());

        ExtractedContent {
            title,
            content_html,
        }
    }
}

fn og_title(doc: &Html) -> Option<String> {
    let sel = Selector::parse(r#"meta[property="og:title"]"#).ok()?;
    doc.select(&sel)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

fn select_text(doc: &Html, css: &str) -> Option<String> {
    let sel = Selector::parse(css).ok()?;
    doc.select(&sel)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}
