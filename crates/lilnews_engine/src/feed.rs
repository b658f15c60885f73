use serde::Deserialize;

/// Endpoint the app reads when no other feed URL is configured.
pub const DEFAULT_FEED_URL: &str = "https://api.lil.software/news";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Feed {
    pub articles: Vec<FeedArticle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedArticle {
    pub title: String,
    pub url: String,
    pub image: Option<String>,
    pub source: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedDecodeError {
    #[error("feed does not match the expected schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Decodes a feed payload. A single malformed article rejects the whole feed.
pub fn decode_feed(bytes: &[u8]) -> Result<Feed, FeedDecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}
