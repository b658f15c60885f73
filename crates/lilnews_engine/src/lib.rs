//! lilnews engine: network IO, feed decoding and page rendering.
mod cache;
mod convert;
mod decode;
mod engine;
mod extract;
mod feed;
mod fetch;
mod page;
mod reader_text;
mod thumbnail;
mod types;

pub use cache::ThumbnailCache;
pub use convert::{Converter, Html2MdConverter};
pub use decode::{decode_page, DecodedPage};
pub use engine::{EngineConfig, EngineHandle};
pub use extract::{ExtractedContent, Extractor, ReadabilityLikeExtractor};
pub use feed::{decode_feed, Feed, FeedArticle, FeedDecodeError, DEFAULT_FEED_URL};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use page::{PageContent, PageRenderer};
pub use reader_text::{prepare_reader_text, MAX_READER_TEXT};
pub use thumbnail::{resolve_thumbnail_url, ThumbnailLoader};
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchKind, FetchMetadata, FetchOutput, LoadTicket,
};
