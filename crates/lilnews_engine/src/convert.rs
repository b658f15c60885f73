pub trait Converter: Send + Sync {
    fn to_text(&self, html: &str) -> String;
}

/// Renders HTML as markdown, which reads well as plain terminal text.
#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_text(&self, html: &str) -> String {
        html2md::parse_html(html)
    }
}
