use crate::convert::{Converter, Html2MdConverter};
use crate::decode::decode_page;
use crate::extract::{Extractor, ReadabilityLikeExtractor};
use crate::reader_text::prepare_reader_text;
use crate::{FetchError, FetchKind, FetchOutput, Fetcher};

/// Readable text of an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub final_url: String,
    pub title: Option<String>,
    pub text: String,
    pub encoding_label: String,
}

/// Turns fetched page bytes into reader text: decode, extract, convert, tidy.
pub struct PageRenderer {
    extractor: Box<dyn Extractor>,
    converter: Box<dyn Converter>,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new(Box::new(ReadabilityLikeExtractor), Box::new(Html2MdConverter))
    }
}

impl PageRenderer {
    pub fn new(extractor: Box<dyn Extractor>, converter: Box<dyn Converter>) -> Self {
        Self {
            extractor,
            converter,
        }
    }

    pub async fn load(&self, fetcher: &dyn Fetcher, url: &str) -> Result<PageContent, FetchError> {
        let output = fetcher.fetch(url, FetchKind::Page).await?;
        Ok(self.render(&output))
    }

    pub fn render(&self, output: &FetchOutput) -> PageContent {
        let decoded = decode_page(&output.bytes, output.metadata.content_type.as_deref());
        let extracted = self.extractor.extract(&decoded.html);
        let text = self.converter.to_text(&extracted.content_html);

        PageContent {
            final_url: output.metadata.final_url.clone(),
            title: extracted.title,
            text: prepare_reader_text(&text),
            encoding_label: decoded.encoding_label,
        }
    }
}
