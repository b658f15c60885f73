/// One entry of the news feed. Identity is structural: two articles with
/// equal fields are the same article.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub image: Option<String>,
    pub source: String,
}

impl Article {
    /// URL handed to the thumbnail loader; empty when the article has no image.
    pub fn thumbnail_url(&self) -> &str {
        self.image.as_deref().unwrap_or("")
    }
}
