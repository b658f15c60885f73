use std::ops::Range;
use std::sync::Arc;

use crate::view_model::{AppViewModel, ArticleRowView, FeedView, ReaderView, ThumbnailView};
use crate::Article;

pub type LoadTicket = u64;

/// How a failed feed fetch is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFailureDisplay {
    /// Show the failure reason in place of the spinner.
    #[default]
    ShowError,
    /// Keep the spinner up forever; the failure is only recorded in state.
    KeepSpinner,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedState {
    #[default]
    Loading,
    Loaded(Vec<ArticleRow>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRow {
    article: Article,
    thumbnail: Option<ThumbnailLoader>,
    reader: Option<ReaderState>,
}

impl ArticleRow {
    fn new(article: Article) -> Self {
        Self {
            article,
            thumbnail: None,
            reader: None,
        }
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    /// Loader owned by this row while it is on screen.
    pub fn thumbnail(&self) -> Option<&ThumbnailLoader> {
        self.thumbnail.as_ref()
    }

    pub fn reader(&self) -> Option<&ReaderState> {
        self.reader.as_ref()
    }
}

/// Per-row image loader state. Data goes from empty to populated at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailLoader {
    ticket: LoadTicket,
    data: Option<Arc<[u8]>>,
    settled: bool,
}

impl ThumbnailLoader {
    fn new(ticket: LoadTicket) -> Self {
        Self {
            ticket,
            data: None,
            settled: false,
        }
    }

    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    pub fn data(&self) -> Option<&Arc<[u8]>> {
        self.data.as_ref()
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

/// Text extracted from an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderPage {
    pub title: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Loaded(ReaderPage),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderState {
    ticket: LoadTicket,
    url: String,
    page: PageState,
    scroll: u16,
    /// Largest useful scroll offset, as measured by the renderer for the
    /// wrapped page. Unbounded until the first measurement.
    max_scroll: Option<u16>,
}

impl ReaderState {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn max_scroll(&self) -> u16 {
        match &self.page {
            PageState::Loaded(_) => self.max_scroll.unwrap_or(u16::MAX),
            PageState::Loading | PageState::Failed(_) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    feed: FeedState,
    failure_display: FeedFailureDisplay,
    fetch_issued: bool,
    next_ticket: LoadTicket,
    mounted: Range<usize>,
    tick: u64,
    status: Option<String>,
    status_expires_at: u64,
    dirty: bool,
}

/// Ticks a footer status stays up (about five seconds at 100 ms per tick).
pub const STATUS_TICKS: u64 = 50;

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure_display(failure_display: FeedFailureDisplay) -> Self {
        Self {
            failure_display,
            ..Self::default()
        }
    }

    pub fn feed(&self) -> &FeedState {
        &self.feed
    }

    pub fn rows(&self) -> &[ArticleRow] {
        match &self.feed {
            FeedState::Loaded(rows) => rows.as_slice(),
            FeedState::Loading | FeedState::Failed(_) => &[],
        }
    }

    pub fn view(&self) -> AppViewModel {
        let feed = match &self.feed {
            FeedState::Loading => FeedView::Loading,
            FeedState::Failed(reason) => match self.failure_display {
                FeedFailureDisplay::ShowError => FeedView::Failed(reason.clone()),
                FeedFailureDisplay::KeepSpinner => FeedView::Loading,
            },
            FeedState::Loaded(rows) => FeedView::Loaded(rows.iter().map(row_view).collect()),
        };
        let reader = self.open_reader().map(|(index, reader)| ReaderView {
            row: index,
            title: self.rows()[index].article.title.clone(),
            url: reader.url.clone(),
            page: reader.page.clone(),
            scroll: reader.scroll,
        });

        AppViewModel {
            loading: matches!(feed, FeedView::Loading),
            feed,
            reader,
            tick: self.tick,
            status: self.status.clone(),
        }
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Marks the one-and-only feed fetch as issued. Returns false if it already was.
    pub(crate) fn begin_feed_fetch(&mut self) -> bool {
        if self.fetch_issued {
            return false;
        }
        self.fetch_issued = true;
        self.mark_dirty();
        true
    }

    pub(crate) fn apply_feed(&mut self, result: Result<Vec<Article>, String>) -> bool {
        if self.feed != FeedState::Loading {
            return false;
        }
        self.feed = match result {
            Ok(articles) => FeedState::Loaded(articles.into_iter().map(ArticleRow::new).collect()),
            Err(reason) => FeedState::Failed(reason),
        };
        self.mounted = 0..0;
        self.mark_dirty();
        true
    }

    fn next_ticket(&mut self) -> LoadTicket {
        self.next_ticket += 1;
        self.next_ticket
    }

    fn rows_mut(&mut self) -> &mut [ArticleRow] {
        match &mut self.feed {
            FeedState::Loaded(rows) => rows.as_mut_slice(),
            FeedState::Loading | FeedState::Failed(_) => &mut [],
        }
    }

    /// Mounts rows entering `visible` and unmounts rows leaving it.
    ///
    /// Returns `(cancelled, started)`: tickets of unsettled loaders that were
    /// dropped, and `(ticket, url)` pairs for new loaders in row order.
    pub(crate) fn set_mounted(
        &mut self,
        visible: Range<usize>,
    ) -> (Vec<LoadTicket>, Vec<(LoadTicket, String)>) {
        let len = self.rows().len();
        let visible = visible.start.min(len)..visible.end.min(len);
        if visible == self.mounted {
            return (Vec::new(), Vec::new());
        }
        let previous = std::mem::replace(&mut self.mounted, visible.clone());

        let mut cancelled = Vec::new();
        for index in previous.clone().filter(|i| !visible.contains(i)) {
            if let Some(loader) = self.rows_mut()[index].thumbnail.take() {
                if !loader.settled {
                    cancelled.push(loader.ticket);
                }
            }
        }

        let mut started = Vec::new();
        for index in visible.filter(|i| !previous.contains(i)) {
            let ticket = self.next_ticket();
            let row = &mut self.rows_mut()[index];
            row.thumbnail = Some(ThumbnailLoader::new(ticket));
            started.push((ticket, row.article.thumbnail_url().to_string()));
        }

        self.mark_dirty();
        (cancelled, started)
    }

    pub(crate) fn apply_thumbnail(&mut self, ticket: LoadTicket, bytes: Option<Vec<u8>>) -> bool {
        let loader = self
            .rows_mut()
            .iter_mut()
            .filter_map(|row| row.thumbnail.as_mut())
            .find(|loader| loader.ticket == ticket && !loader.settled);
        let Some(loader) = loader else {
            return false;
        };
        loader.settled = true;
        loader.data = bytes.map(Arc::from);
        self.mark_dirty();
        true
    }

    fn open_reader(&self) -> Option<(usize, &ReaderState)> {
        self.rows()
            .iter()
            .enumerate()
            .find_map(|(index, row)| row.reader.as_ref().map(|reader| (index, reader)))
    }

    fn open_reader_mut(&mut self) -> Option<&mut ReaderState> {
        self.rows_mut()
            .iter_mut()
            .find_map(|row| row.reader.as_mut())
    }

    pub(crate) fn reader_url(&self) -> Option<String> {
        self.open_reader().map(|(_, reader)| reader.url.clone())
    }

    /// Opens the reader on row `index`. Returns the page request to issue.
    pub(crate) fn open_reader_at(&mut self, index: usize) -> Option<(LoadTicket, String)> {
        if self.open_reader().is_some() || index >= self.rows().len() {
            return None;
        }
        let ticket = self.next_ticket();
        let row = &mut self.rows_mut()[index];
        let url = row.article.url.clone();
        row.reader = Some(ReaderState {
            ticket,
            url: url.clone(),
            page: PageState::Loading,
            scroll: 0,
            max_scroll: None,
        });
        self.mark_dirty();
        Some((ticket, url))
    }

    pub(crate) fn apply_page(
        &mut self,
        ticket: LoadTicket,
        result: Result<ReaderPage, String>,
    ) -> bool {
        let Some(reader) = self.open_reader_mut() else {
            return false;
        };
        if reader.ticket != ticket || reader.page != PageState::Loading {
            return false;
        }
        reader.page = match result {
            Ok(page) => PageState::Loaded(page),
            Err(reason) => PageState::Failed(reason),
        };
        self.mark_dirty();
        true
    }

    pub(crate) fn scroll_reader(&mut self, delta: i32) {
        let Some(reader) = self.open_reader_mut() else {
            return;
        };
        let target = i64::from(reader.scroll) + i64::from(delta);
        let clamped = target.clamp(0, i64::from(reader.max_scroll()));
        let next = u16::try_from(clamped).unwrap_or(0);
        if next != reader.scroll {
            reader.scroll = next;
            self.mark_dirty();
        }
    }

    /// Records the renderer's scroll limit and pulls the offset back inside it.
    pub(crate) fn measure_reader(&mut self, max_scroll: u16) {
        let Some(reader) = self.open_reader_mut() else {
            return;
        };
        reader.max_scroll = Some(max_scroll);
        if reader.scroll > max_scroll {
            reader.scroll = max_scroll;
            self.mark_dirty();
        }
    }

    pub(crate) fn close_reader(&mut self) -> bool {
        let mut closed = false;
        for row in self.rows_mut() {
            closed |= row.reader.take().is_some();
        }
        if closed {
            self.mark_dirty();
        }
        closed
    }

    pub(crate) fn set_status(&mut self, status: String) {
        self.status = Some(status);
        self.status_expires_at = self.tick.wrapping_add(STATUS_TICKS);
        self.mark_dirty();
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.status.is_some() && self.tick == self.status_expires_at {
            self.status = None;
            self.mark_dirty();
        }
        if self.view_is_spinning() {
            self.mark_dirty();
        }
    }

    fn view_is_spinning(&self) -> bool {
        let feed_spinning = match &self.feed {
            FeedState::Loading => true,
            FeedState::Failed(_) => self.failure_display == FeedFailureDisplay::KeepSpinner,
            FeedState::Loaded(_) => false,
        };
        let reader_spinning = self
            .open_reader()
            .is_some_and(|(_, reader)| reader.page == PageState::Loading);
        feed_spinning || reader_spinning
    }
}

fn row_view(row: &ArticleRow) -> ArticleRowView {
    let thumbnail = match &row.thumbnail {
        Some(ThumbnailLoader {
            ticket,
            data: Some(bytes),
            ..
        }) => ThumbnailView::Image {
            ticket: *ticket,
            bytes: bytes.clone(),
        },
        _ => ThumbnailView::Placeholder,
    };
    ArticleRowView {
        title: row.article.title.clone(),
        source: row.article.source.clone(),
        url: row.article.url.clone(),
        thumbnail,
    }
}
