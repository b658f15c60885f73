use std::sync::mpsc;

use lilnews_core::{Article, Effect, Msg, ReaderPage};
use lilnews_engine::{EngineConfig, EngineEvent, EngineHandle, FeedArticle, PageContent};
use lilnews_logging::{news_debug, news_info, news_warn};

/// Carries effects from `update` to the engine and brings engine results
/// back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self {
            engine: EngineHandle::new(config),
            msg_tx,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchFeed => {
                    news_info!("FetchFeed");
                    self.engine.fetch_feed();
                }
                Effect::LoadThumbnail { ticket, url } => {
                    news_debug!("LoadThumbnail ticket={} url={}", ticket, url);
                    self.engine.load_thumbnail(ticket, url);
                }
                Effect::CancelThumbnail { ticket } => {
                    news_debug!("CancelThumbnail ticket={}", ticket);
                    self.engine.cancel_thumbnail(ticket);
                }
                Effect::LoadPage { ticket, url } => {
                    news_info!("LoadPage ticket={} url={}", ticket, url);
                    self.engine.load_page(ticket, url);
                }
                Effect::OpenExternal { url } => self.open_external(&url),
            }
        }
    }

    /// Forwards every engine event received so far.
    pub fn pump(&self) {
        while let Some(event) = self.engine.try_recv() {
            let _ = self.msg_tx.send(event_to_msg(event));
        }
    }

    fn open_external(&self, url: &str) {
        let status = match webbrowser::open(url) {
            Ok(()) => {
                news_info!("Opened {} in the system browser", url);
                format!("Opened {url} in browser")
            }
            Err(err) => {
                news_warn!("Could not open {} in the system browser: {}", url, err);
                format!("Could not open browser: {err}")
            }
        };
        let _ = self.msg_tx.send(Msg::StatusReported(status));
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FeedCompleted(result) => Msg::FeedLoaded(
            result
                .map(|feed| feed.articles.into_iter().map(to_article).collect())
                .map_err(|err| err.to_string()),
        ),
        EngineEvent::ThumbnailCompleted { ticket, bytes } => Msg::ThumbnailDone { ticket, bytes },
        EngineEvent::PageCompleted { ticket, result } => Msg::PageLoaded {
            ticket,
            result: result.map(to_reader_page).map_err(|err| err.to_string()),
        },
    }
}

fn to_article(article: FeedArticle) -> Article {
    Article {
        title: article.title,
        url: article.url,
        image: article.image,
        source: article.source,
    }
}

fn to_reader_page(page: PageContent) -> ReaderPage {
    ReaderPage {
        title: page.title,
        text: page.text,
    }
}
