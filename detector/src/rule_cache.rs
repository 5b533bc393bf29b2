use std::sync::Arc;

use regex::RegexBuilder;
use shared::store::RuleStore;
use shared::types::CustomRule;
use tokio::sync::{Mutex, RwLock};
use tracing::warn;

/// Result of evaluating one custom rule against one message. A rule whose
/// pattern doesn't compile yields `Failed` instead of aborting the pass,
/// so one broken rule can never mask the others.
pub enum RuleOutcome {
    Match,
    NoMatch,
    Failed(regex::Error),
}

/// Compiles the rule's pattern for this pass and matches it
/// case-insensitively against the full content.
pub fn evaluate_rule(rule: &CustomRule, content: &str) -> RuleOutcome {
    match RegexBuilder::new(&rule.pattern)
        .case_insensitive(true)
        .build()
    {
        Ok(regex) => {
            if regex.is_match(content) {
                RuleOutcome::Match
            } else {
                RuleOutcome::NoMatch
            }
        }
        Err(e) => RuleOutcome::Failed(e),
    }
}

struct Snapshot {
    rules: Arc<Vec<CustomRule>>,
    refreshed_at: Option<i64>,
}

/// TTL-refreshed snapshot of the custom rule set, with the same
/// single-flight refresh policy as the word cache: one fetch at a time,
/// losers serve the previous snapshot, a failed fetch keeps the last good
/// one.
pub struct RuleCache<S> {
    store: S,
    ttl_millis: i64,
    snapshot: RwLock<Snapshot>,
    refresh_gate: Mutex<()>,
}

impl<S: RuleStore> RuleCache<S> {
    pub fn new(store: S, ttl_millis: i64) -> Self {
        Self {
            store,
            ttl_millis,
            snapshot: RwLock::new(Snapshot {
                rules: Arc::new(Vec::new()),
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

    pub async fn get(&self, now: i64) -> Arc<Vec<CustomRule>> {
        {
            let current = self.snapshot.read().await;
            if self.is_fresh(current.refreshed_at, now) {
                return Arc::clone(&current.rules);
            }
        }

        let _gate = match self.refresh_gate.try_lock() {
            Ok(gate) => gate,
            Err(_) => {
                return Arc::clone(&self.snapshot.read().await.rules);
            }
        };

        {
            let current = self.snapshot.read().await;
            if self.is_fresh(current.refreshed_at, now) {
                return Arc::clone(&current.rules);
            }
        }

        let rules = match self.store.fetch_all().await {
            Ok(rules) => Arc::new(rules),
            Err(e) => {
                warn!("Couldn't refresh the custom rule set: {}", &e);
                return Arc::clone(&self.snapshot.read().await.rules);
            }
        };

        let mut current = self.snapshot.write().await;
        current.rules = Arc::clone(&rules);
        current.refreshed_at = Some(now);
        rules
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use stores::memory::MemoryRuleStore;

    const TTL: i64 = 10_000;

    #[test]
    fn matching_is_case_insensitive() {
        let rule = CustomRule::new(1, r"join\s+my\s+server", "Server advertising");
        assert!(matches!(
            evaluate_rule(&rule, "please JOIN MY Server today"),
            RuleOutcome::Match
        ));
        assert!(matches!(
            evaluate_rule(&rule, "nothing to see"),
            RuleOutcome::NoMatch
        ));
    }

    #[test]
    fn malformed_pattern_reports_failure() {
        let rule = CustomRule::new(2, r"(unclosed", "broken");
        assert!(matches!(
            evaluate_rule(&rule, "anything"),
            RuleOutcome::Failed(_)
        ));
    }

    #[tokio::test]
    async fn rule_added_after_refresh_becomes_visible_past_the_ttl() {
        let store = MemoryRuleStore::new();
        store.add_rule(r"free\s+gems", "Gem scam").await;

        let cache = RuleCache::new(store.clone(), TTL);
        assert_eq!(cache.get(0).await.len(), 1);

        store.add_rule(r"click\s+here", "Clickbait").await;
        assert_eq!(cache.get(5000).await.len(), 1);

        let refreshed = cache.get(TTL).await;
        assert_eq!(refreshed.len(), 2);
        assert_eq!(refreshed[1].description, "Clickbait");
    }
}
