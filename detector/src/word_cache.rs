use std::collections::HashSet;
use std::sync::Arc;

use shared::store::WordStore;
use tokio::sync::{Mutex, RwLock};
use tracing::warn;

struct Snapshot {
    words: Arc<Vec<String>>,
    refreshed_at: Option<i64>,
}

/// TTL-refreshed snapshot of the banned-word set. Readers always get the
/// last complete snapshot; at most one caller at a time performs the
/// refresh fetch, and callers that lose that race are served the previous
/// snapshot instead of waiting on store I/O.
pub struct WordCache<S> {
    store: S,
    ttl_millis: i64,
    snapshot: RwLock<Snapshot>,
    refresh_gate: Mutex<()>,
}

impl<S: WordStore> WordCache<S> {
    pub fn new(store: S, ttl_millis: i64) -> Self {
        Self {
            store,
            ttl_millis,
            snapshot: RwLock::new(Snapshot {
                words: Arc::new(Vec::new()),
                refreshed_at: None,
            }),
            refresh_gate: Mutex::new(()),
        }
    }

    fn is_fresh(&self, refreshed_at: Option<i64>, now: i64) -> bool {
        match refreshed_at {
            Some(timestamp) => now - timestamp < self.ttl_millis,
            None => false,
        }
    }

    pub async fn get(&self, now: i64) -> Arc<Vec<String>> {
        {
            let current = self.snapshot.read().await;
            if self.is_fresh(current.refreshed_at, now) {
                return Arc::clone(&current.words);
            }
        }

        let _gate = match self.refresh_gate.try_lock() {
            Ok(gate) => gate,
            Err(_) => {
                // A refresh is already in flight, serve the previous
                // snapshot rather than waiting for it
                return Arc::clone(&self.snapshot.read().await.words);
            }
        };

        // The refresh could have finished while we were acquiring the gate
        {
            let current = self.snapshot.read().await;
            if self.is_fresh(current.refreshed_at, now) {
                return Arc::clone(&current.words);
            }
        }

        let words = match self.store.fetch_all().await {
            Ok(words) => Arc::new(normalize(words)),
            Err(e) => {
                // Keep the last good snapshot; refreshed_at stays put, so
                // the next call past the TTL retries
                warn!("Couldn't refresh the banned word set: {}", &e);
                return Arc::clone(&self.snapshot.read().await.words);
            }
        };

        let mut current = self.snapshot.write().await;
        current.words = Arc::clone(&words);
        current.refreshed_at = Some(now);
        words
    }
}

/// Lower-cases and trims every word, drops empty ones and deduplicates
/// while keeping the first occurrence's position, so iteration order is
/// stable across a process run.
fn normalize(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(words.len());
    for word in words {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            continue;
        }
        if seen.insert(word.clone()) {
            normalized.push(word);
        }
    }
    normalized
}
