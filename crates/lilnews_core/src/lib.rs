//! lilnews core: pure state machine and view-model helpers.
mod article;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use article::Article;
pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, ArticleRow, FeedFailureDisplay, FeedState, LoadTicket, PageState, ReaderPage,
    ReaderState, ThumbnailLoader, STATUS_TICKS,
};
pub use update::update;
pub use view_model::{AppViewModel, ArticleRowView, FeedView, ReaderView, ThumbnailView};
