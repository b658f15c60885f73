use crate::LoadTicket;

/// Side effects requested by `update`; executed by the app's effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch and decode the article feed.
    FetchFeed,
    /// Start a thumbnail loader for a row that came into view.
    LoadThumbnail { ticket: LoadTicket, url: String },
    /// Cancel the loader of a row that went out of view.
    CancelThumbnail { ticket: LoadTicket },
    /// Fetch an article page for the in-app reader.
    LoadPage { ticket: LoadTicket, url: String },
    /// Hand a URL to the system browser.
    OpenExternal { url: String },
}
