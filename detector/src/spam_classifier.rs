use shared::classifier_params::ClassifierParams;
use shared::store::{RuleStore, WordStore};
use shared::types::{InboundMessage, Verdict};
use tracing::warn;

use crate::checks;
use crate::error::ClassifyError;
use crate::history::MessageHistory;
use crate::rule_cache::{evaluate_rule, RuleCache, RuleOutcome};
use crate::word_cache::WordCache;

/// Runs every detector against one message in a fixed priority order and
/// returns the first positive verdict. The order is a contract: repeated
/// messages beat gibberish, gibberish beats caps, and so on down to the
/// custom rules, which run last.
pub struct SpamClassifier<W, R> {
    params: ClassifierParams,
    history: MessageHistory,
    words: WordCache<W>,
    rules: RuleCache<R>,
}

impl<W: WordStore, R: RuleStore> SpamClassifier<W, R> {
    pub fn new(params: ClassifierParams, word_store: W, rule_store: R) -> Self {
        let words = WordCache::new(word_store, params.word_cache_ttl_millis());
        let rules = RuleCache::new(rule_store, params.rule_cache_ttl_millis());
        Self {
            params,
            history: MessageHistory::new(),
            words,
            rules,
        }
    }

    pub async fn classify(&self, message: &InboundMessage) -> Result<Verdict, ClassifyError> {
        if message.author_id.is_empty() {
            return Err(ClassifyError::MissingAuthorId);
        }

        let content = &message.content;
        let now = message.received_at;

        let repeats = self.history.record_and_count(
            &message.author_id,
            content,
            now,
            self.params.repeat_window_millis(),
        );
        if self.params.is_repeated(repeats) {
            return Ok(Verdict::spam(checks::REPEATED_MESSAGE_REASON));
        }

        if checks::is_gibberish(content) {
            return Ok(Verdict::spam(checks::GIBBERISH_REASON));
        }

        if checks::is_excessive_caps(content, &self.params) {
            return Ok(Verdict::spam(checks::EXCESSIVE_CAPS_REASON));
        }

        if let Some(reason) = checks::character_spam(content, &self.params) {
            return Ok(Verdict::spam(reason));
        }

        if checks::is_line_spam(content, &self.params) {
            return Ok(Verdict::spam(checks::LINE_SPAM_REASON));
        }

        if self.params.is_excessive_emoji(checks::emoji_count(content)) {
            return Ok(Verdict::spam(checks::EXCESSIVE_EMOJI_REASON));
        }

        if let Some(reason) = checks::url_policy(content) {
            return Ok(Verdict::spam(reason));
        }

        let words = self.words.get(now).await;
        if let Some(reason) = checks::banned_word(content, &words) {
            return Ok(Verdict::spam(reason));
        }

        let rules = self.rules.get(now).await;
        for rule in rules.iter() {
            match evaluate_rule(rule, content) {
                RuleOutcome::Match => return Ok(Verdict::spam(rule.description.clone())),
                RuleOutcome::NoMatch => {}
                RuleOutcome::Failed(e) => {
                    warn!(
                        "Skipping custom rule {}, its pattern doesn't compile: {}",
                        rule.id, &e
                    );
                }
            }
        }

        Ok(Verdict::Clean)
    }
}
