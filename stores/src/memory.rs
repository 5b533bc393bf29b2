use std::sync::Arc;

use async_trait::async_trait;
use shared::store::{RuleStore, StoreError, WordStore};
use shared::types::CustomRule;
use tokio::sync::RwLock;

/// In-memory banned word store. Handles are cheap clones over the same
/// underlying set, so the operator surface and the cache can share one
/// store instance.
#[derive(Clone)]
pub struct MemoryWordStore {
    words: Arc<RwLock<Vec<String>>>,
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self {
            words: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Adds a word, lower-cased, ignoring duplicates.
    pub async fn add_word(&self, word: &str) {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return;
        }
        let mut words = self.words.write().await;
        if !words.contains(&word) {
            words.push(word);
        }
    }

    pub async fn remove_word(&self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        let mut words = self.words.write().await;
        let initial_length = words.len();
        words.retain(|existing| existing != &word);
        words.len() != initial_length
    }
}

impl Default for MemoryWordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WordStore for MemoryWordStore {
    async fn fetch_all(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.words.read().await.clone())
    }
}

struct RuleSet {
    next_id: u64,
    rules: Vec<CustomRule>,
}

/// In-memory custom rule store with sequential rule ids starting at 1.
#[derive(Clone)]
pub struct MemoryRuleStore {
    inner: Arc<RwLock<RuleSet>>,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RuleSet {
                next_id: 1,
                rules: Vec::new(),
            })),
        }
    }

    /// Adds a rule and returns its assigned id. The pattern is stored as
    /// given; validity is checked at evaluation time.
    pub async fn add_rule(&self, pattern: &str, description: &str) -> u64 {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.rules.push(CustomRule::new(id, pattern, description));
        id
    }

    pub async fn delete_rule(&self, rule_id: u64) -> bool {
        let mut inner = self.inner.write().await;
        let initial_length = inner.rules.len();
        inner.rules.retain(|rule| rule.id != rule_id);
        inner.rules.len() != initial_length
    }
}

impl Default for MemoryRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn fetch_all(&self) -> Result<Vec<CustomRule>, StoreError> {
        Ok(self.inner.read().await.rules.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn words_are_normalized_and_deduplicated() {
        let store = MemoryWordStore::new();
        store.add_word(" Viagra ").await;
        store.add_word("VIAGRA").await;
        store.add_word("casino").await;
        store.add_word("   ").await;

        let words = store.fetch_all().await.unwrap();
        assert_eq!(words, vec!["viagra".to_string(), "casino".to_string()]);

        assert!(store.remove_word("Viagra").await);
        assert!(!store.remove_word("viagra").await);
        assert_eq!(store.fetch_all().await.unwrap(), vec!["casino".to_string()]);
    }

    #[tokio::test]
    async fn rule_ids_are_sequential() {
        let store = MemoryRuleStore::new();
        let first = store.add_rule(r"free\s+gems", "Gem scam").await;
        let second = store.add_rule(r"click\s+here", "Clickbait").await;
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        assert!(store.delete_rule(first).await);
        assert!(!store.delete_rule(first).await);

        let rules = store.fetch_all().await.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, second);
        assert_eq!(rules[0].description, "Clickbait");
    }

    #[tokio::test]
    async fn clones_share_the_same_storage() {
        let store = MemoryWordStore::new();
        let handle = store.clone();
        handle.add_word("shared").await;
        assert_eq!(store.fetch_all().await.unwrap(), vec!["shared".to_string()]);
    }
}
