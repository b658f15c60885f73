use crate::{Article, LoadTicket, ReaderPage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The screen appeared for the first time.
    Started,
    /// Feed fetch finished; `Err` carries a human readable reason.
    FeedLoaded(Result<Vec<Article>, String>),
    /// The renderer reports which rows are on screen.
    RowsVisible { first: usize, count: usize },
    /// A thumbnail loader settled. `None` means no body arrived.
    ThumbnailDone {
        ticket: LoadTicket,
        bytes: Option<Vec<u8>>,
    },
    /// User activated a row.
    RowActivated { index: usize },
    /// Reader page fetch finished.
    PageLoaded {
        ticket: LoadTicket,
        result: Result<ReaderPage, String>,
    },
    /// User scrolled the reader by the given number of lines.
    ReaderScrolled(i32),
    /// The renderer measured the open page; `max_scroll` keeps the last
    /// wrapped line reachable.
    ReaderMeasured { max_scroll: u16 },
    /// User closed the reader.
    ReaderDismissed,
    /// User asked to open the reader's URL in the system browser.
    OpenInBrowserRequested,
    /// One-line status for the footer.
    StatusReported(String),
    /// UI tick used to animate spinners.
    Tick,
}
