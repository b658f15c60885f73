use std::sync::Arc;

use crate::{LoadTicket, PageState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub feed: FeedView,
    /// True while the screen shows the loading spinner.
    pub loading: bool,
    pub reader: Option<ReaderView>,
    pub tick: u64,
    pub status: Option<String>,
}

impl AppViewModel {
    pub fn rows(&self) -> &[ArticleRowView] {
        match &self.feed {
            FeedView::Loaded(rows) => rows.as_slice(),
            FeedView::Loading | FeedView::Failed(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    Loading,
    Loaded(Vec<ArticleRowView>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRowView {
    pub title: String,
    pub source: String,
    pub url: String,
    pub thumbnail: ThumbnailView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailView {
    /// Nothing to draw yet, or the loader settled without data.
    Placeholder,
    /// Raw bytes as received; may still fail to decode.
    Image { ticket: LoadTicket, bytes: Arc<[u8]> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderView {
    pub row: usize,
    pub title: String,
    pub url: String,
    pub page: PageState,
    pub scroll: u16,
}
