#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use lilnews_engine::{
    FailureKind, FetchError, FetchKind, FetchMetadata, FetchOutput, Fetcher,
};

/// Fetcher that records every requested URL and answers from a fixed table.
#[derive(Default)]
pub struct RecordingFetcher {
    requests: Mutex<Vec<(String, FetchKind)>>,
    responses: Mutex<Vec<(String, Vec<u8>)>>,
    delay: Option<Duration>,
}

impl RecordingFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    pub fn respond(&self, url: &str, body: &[u8]) {
        self.responses
            .lock()
            .unwrap()
            .push((url.to_string(), body.to_vec()));
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl Fetcher for RecordingFetcher {
    async fn fetch(&self, url: &str, kind: FetchKind) -> Result<FetchOutput, FetchError> {
        self.requests.lock().unwrap().push((url.to_string(), kind));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let body = self
            .responses
            .lock()
            .unwrap()
            .iter()
            .find(|(known, _)| known == url)
            .map(|(_, body)| body.clone());
        match body {
            Some(bytes) => Ok(FetchOutput {
                metadata: FetchMetadata {
                    original_url: url.to_string(),
                    final_url: url.to_string(),
                    content_type: None,
                    byte_len: bytes.len() as u64,
                },
                bytes,
            }),
            None => Err(FetchError::new(FailureKind::Network, "connection refused")),
        }
    }
}
