use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Bounded URL → bytes map with least-recently-used eviction.
///
/// A capacity of zero stores nothing.
#[derive(Debug, Default)]
pub struct ThumbnailCache {
    capacity: usize,
    entries: HashMap<String, Arc<Vec<u8>>>,
    recency: VecDeque<String>,
}

impl ThumbnailCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            recency: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&mut self, url: &str) -> Option<Arc<Vec<u8>>> {
        let bytes = self.entries.get(url)?.clone();
        self.touch(url);
        Some(bytes)
    }

    pub fn insert(&mut self, url: String, bytes: Arc<Vec<u8>>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(url.clone(), bytes).is_some() {
            self.touch(&url);
            return;
        }
        self.recency.push_back(url);
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.recency.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    fn touch(&mut self, url: &str) {
        if let Some(pos) = self.recency.iter().position(|key| key == url) {
            if let Some(key) = self.recency.remove(pos) {
                self.recency.push_back(key);
            }
        }
    }
}
