#![allow(dead_code)]

use std::sync::Once;

use lilnews_core::{update, AppState, Article, Effect, Msg};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(lilnews_logging::initialize_for_tests);
}

pub fn article(title: &str, image: Option<&str>, source: &str) -> Article {
    Article {
        title: title.to_string(),
        url: format!("https://news.example/{}", title.to_lowercase()),
        image: image.map(str::to_string),
        source: source.to_string(),
    }
}

/// Starts the screen and delivers `articles` as the feed response.
pub fn loaded(articles: Vec<Article>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(state, Msg::FeedLoaded(Ok(articles)));
    state
}

pub fn thumbnail_loads(effects: &[Effect]) -> Vec<(u64, String)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::LoadThumbnail { ticket, url } => Some((*ticket, url.clone())),
            _ => None,
        })
        .collect()
}
