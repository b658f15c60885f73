use lilnews_logging::{news_debug, news_info, news_warn};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if state.begin_feed_fetch() {
                vec![Effect::FetchFeed]
            } else {
                Vec::new()
            }
        }
        Msg::FeedLoaded(result) => {
            match &result {
                Ok(articles) => news_info!("Feed loaded with {} articles", articles.len()),
                Err(reason) => news_warn!("Feed failed: {}", reason),
            }
            if !state.apply_feed(result) {
                news_debug!("Ignoring feed result after the feed already settled");
            }
            Vec::new()
        }
        Msg::RowsVisible { first, count } => {
            let (cancelled, started) = state.set_mounted(first..first.saturating_add(count));
            let mut effects = Vec::with_capacity(cancelled.len() + started.len());
            for ticket in cancelled {
                effects.push(Effect::CancelThumbnail { ticket });
            }
            for (ticket, url) in started {
                effects.push(Effect::LoadThumbnail { ticket, url });
            }
            effects
        }
        Msg::ThumbnailDone { ticket, bytes } => {
            if !state.apply_thumbnail(ticket, bytes) {
                news_debug!("Dropping thumbnail for stale ticket {}", ticket);
            }
            Vec::new()
        }
        Msg::RowActivated { index } => match state.open_reader_at(index) {
            Some((ticket, url)) => vec![Effect::LoadPage { ticket, url }],
            None => Vec::new(),
        },
        Msg::PageLoaded { ticket, result } => {
            if !state.apply_page(ticket, result) {
                news_debug!("Dropping page for stale ticket {}", ticket);
            }
            Vec::new()
        }
        Msg::ReaderScrolled(delta) => {
            state.scroll_reader(delta);
            Vec::new()
        }
        Msg::ReaderMeasured { max_scroll } => {
            state.measure_reader(max_scroll);
            Vec::new()
        }
        Msg::ReaderDismissed => {
            state.close_reader();
            Vec::new()
        }
        Msg::OpenInBrowserRequested => match state.reader_url() {
            Some(url) => vec![Effect::OpenExternal { url }],
            None => Vec::new(),
        },
        Msg::StatusReported(status) => {
            state.set_status(status);
            Vec::new()
        }
        Msg::Tick => {
            state.advance_tick();
            Vec::new()
        }
    };

    (state, effects)
}
