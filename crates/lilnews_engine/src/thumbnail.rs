use std::sync::{Arc, Mutex};

use lilnews_logging::{news_debug, news_warn};
use url::Url;

use crate::cache::ThumbnailCache;
use crate::{FetchKind, Fetcher};

/// Resolves a raw thumbnail string to the URL that is actually requested.
///
/// A leading `http://` becomes `https://`; nothing else is normalized.
pub fn resolve_thumbnail_url(raw: &str) -> Result<Url, url::ParseError> {
    match raw.strip_prefix("http://") {
        Some(rest) => Url::parse(&format!("https://{rest}")),
        None => Url::parse(raw),
    }
}

/// One-shot thumbnail fetcher shared by all rows.
pub struct ThumbnailLoader {
    fetcher: Arc<dyn Fetcher>,
    cache: Mutex<ThumbnailCache>,
}

impl ThumbnailLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>, cache_capacity: usize) -> Self {
        Self {
            fetcher,
            cache: Mutex::new(ThumbnailCache::new(cache_capacity)),
        }
    }

    /// Fetches the image behind `raw_url`.
    ///
    /// Returns `None` without touching the network when the URL does not parse,
    /// and `None` when the fetch fails.
    pub async fn load(&self, raw_url: &str) -> Option<Vec<u8>> {
        let url = match resolve_thumbnail_url(raw_url) {
            Ok(url) => url,
            Err(err) => {
                news_warn!("Invalid thumbnail URL {:?}: {}", raw_url, err);
                return None;
            }
        };

        if let Some(bytes) = self.cached(url.as_str()) {
            news_debug!("Thumbnail cache hit for {}", url);
            return Some(bytes.as_ref().clone());
        }

        match self.fetcher.fetch(url.as_str(), FetchKind::Thumbnail).await {
            Ok(output) => {
                let bytes = Arc::new(output.bytes);
                if let Ok(mut cache) = self.cache.lock() {
                    cache.insert(url.to_string(), bytes.clone());
                }
                Some(Arc::unwrap_or_clone(bytes))
            }
            Err(err) => {
                news_debug!("Thumbnail fetch failed for {}: {}", url, err);
                None
            }
        }
    }

    fn cached(&self, url: &str) -> Option<Arc<Vec<u8>>> {
        self.cache.lock().ok()?.get(url)
    }
}
