use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use lilnews_logging::{news_debug, news_info, news_warn};
use tokio_util::sync::CancellationToken;

use crate::feed::{decode_feed, DEFAULT_FEED_URL};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::page::PageRenderer;
use crate::thumbnail::ThumbnailLoader;
use crate::{EngineEvent, FailureKind, FetchError, FetchKind, LoadTicket};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub feed_url: String,
    pub fetch: FetchSettings,
    /// Entries kept by the shared thumbnail cache; `0` disables it.
    pub thumbnail_cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            fetch: FetchSettings::default(),
            thumbnail_cache_capacity: 64,
        }
    }
}

enum EngineCommand {
    FetchFeed,
    LoadThumbnail { ticket: LoadTicket, url: String },
    CancelThumbnail { ticket: LoadTicket },
    LoadPage { ticket: LoadTicket, url: String },
}

type InFlight = Arc<Mutex<HashMap<LoadTicket, CancellationToken>>>;

struct Workers {
    feed_url: String,
    fetcher: Arc<dyn Fetcher>,
    thumbnails: Arc<ThumbnailLoader>,
    pages: Arc<PageRenderer>,
    in_flight: InFlight,
}

/// Owns the engine thread. Every request runs as its own task on a tokio
/// runtime; results come back through `try_recv`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: EngineConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let workers = Workers {
            feed_url: config.feed_url,
            thumbnails: Arc::new(ThumbnailLoader::new(
                fetcher.clone(),
                config.thumbnail_cache_capacity,
            )),
            fetcher,
            pages: Arc::new(PageRenderer::default()),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        };

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &workers, command, &event_tx);
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch_feed(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchFeed);
    }

    pub fn load_thumbnail(&self, ticket: LoadTicket, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::LoadThumbnail {
            ticket,
            url: url.into(),
        });
    }

    /// Cancels an in-flight thumbnail; no event is sent for it afterwards.
    pub fn cancel_thumbnail(&self, ticket: LoadTicket) {
        let _ = self.cmd_tx.send(EngineCommand::CancelThumbnail { ticket });
    }

    pub fn load_page(&self, ticket: LoadTicket, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::LoadPage {
            ticket,
            url: url.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event or until the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    workers: &Workers,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchFeed => {
            let fetcher = workers.fetcher.clone();
            let url = workers.feed_url.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                news_info!("Fetching feed {}", url);
                let result = fetch_feed(fetcher.as_ref(), &url).await;
                let _ = event_tx.send(EngineEvent::FeedCompleted(result));
            });
        }
        EngineCommand::LoadThumbnail { ticket, url } => {
            let token = CancellationToken::new();
            if let Ok(mut in_flight) = workers.in_flight.lock() {
                in_flight.insert(ticket, token.clone());
            }
            let loader = workers.thumbnails.clone();
            let in_flight = workers.in_flight.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let outcome = tokio::select! {
                    _ = token.cancelled() => None,
                    bytes = loader.load(&url) => Some(bytes),
                };
                if let Ok(mut in_flight) = in_flight.lock() {
                    in_flight.remove(&ticket);
                }
                match outcome {
                    Some(bytes) => {
                        let _ = event_tx.send(EngineEvent::ThumbnailCompleted { ticket, bytes });
                    }
                    None => news_debug!("Thumbnail {} cancelled", ticket),
                }
            });
        }
        EngineCommand::CancelThumbnail { ticket } => {
            let token = workers
                .in_flight
                .lock()
                .ok()
                .and_then(|mut in_flight| in_flight.remove(&ticket));
            if let Some(token) = token {
                token.cancel();
            }
        }
        EngineCommand::LoadPage { ticket, url } => {
            let fetcher = workers.fetcher.clone();
            let pages = workers.pages.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = pages.load(fetcher.as_ref(), &url).await;
                if let Err(err) = &result {
                    news_warn!("Page {} failed: {}", url, err);
                }
                let _ = event_tx.send(EngineEvent::PageCompleted { ticket, result });
            });
        }
    }
}

async fn fetch_feed(fetcher: &dyn Fetcher, url: &str) -> Result<crate::Feed, FetchError> {
    let output = fetcher.fetch(url, FetchKind::Feed).await.inspect_err(|err| {
        news_warn!("Feed fetch failed: {}", err);
    })?;
    decode_feed(&output.bytes).map_err(|err| {
        news_warn!("Feed decode failed: {}", err);
        FetchError::new(FailureKind::Decode, err.to_string())
    })
}
