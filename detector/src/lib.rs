use std::sync::Arc;

use shared::classifier_params::ClassifierParams;
use shared::messages::classifier::{IncMessage, OutMessage};
use shared::store::{RuleStore, WordStore};
use shared::ActorWrapper;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing::{info, warn};

use error::ManagerError;

pub mod error;

mod checks;
mod history;
mod rule_cache;
mod spam_classifier;
mod word_cache;

pub use rule_cache::{evaluate_rule, RuleCache, RuleOutcome};
pub use spam_classifier::SpamClassifier;
pub use word_cache::WordCache;

pub struct ClassifierManager<W, R> {
    classifier: Arc<SpamClassifier<W, R>>,
    rx: Receiver<IncMessage>,
    out_tx: Sender<OutMessage>,
}

impl<W: WordStore, R: RuleStore> ClassifierManager<W, R> {
    pub fn init(
        params: ClassifierParams,
        word_store: W,
        rule_store: R,
        out_tx: Sender<OutMessage>,
    ) -> ActorWrapper<IncMessage> {
        let (tx, rx) = mpsc::channel(32);
        let manager = Self {
            classifier: Arc::new(SpamClassifier::new(params, word_store, rule_store)),
            rx,
            out_tx,
        };

        let join_handle = tokio::spawn(async move {
            manager.run().await;
        });

        ActorWrapper { join_handle, tx }
    }

    async fn run(mut self) {
        match self.do_run().await {
            Ok(_r) => {
                // Manager finished its work due to incoming `Close` message
            }
            Err(e) => {
                warn!("ClassifierManager: Error, while processing messages: {}", &e);
            }
        }

        info!("ClassifierManager has been closed");
    }

    async fn do_run(&mut self) -> Result<(), ManagerError> {
        loop {
            let message = match self.rx.recv().await {
                Some(message) => message,
                None => {
                    return Err(ManagerError::IncomingChannelClosed);
                }
            };

            match message {
                IncMessage::Close => {
                    return Ok(());
                }
                IncMessage::Message(inbound) => {
                    // One task per message, so a single slow classification
                    // never holds back unrelated authors
                    let classifier = Arc::clone(&self.classifier);
                    let out_tx = self.out_tx.clone();
                    tokio::spawn(async move {
                        match classifier.classify(&inbound).await {
                            Ok(verdict) => {
                                let out_message = OutMessage::new(inbound, verdict);
                                if let Err(e) = out_tx.send(out_message).await {
                                    warn!("Verdict receiver's end of the channel has closed: {}", &e);
                                }
                            }
                            Err(e) => {
                                warn!("Dropping message that couldn't be classified: {}", &e);
                            }
                        }
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use shared::types::{InboundMessage, Verdict};
    use stores::memory::{MemoryRuleStore, MemoryWordStore};

    #[tokio::test]
    async fn manager_classifies_and_closes() {
        let (out_tx, mut out_rx) = mpsc::channel(32);
        let actor = ClassifierManager::init(
            ClassifierParams::default(),
            MemoryWordStore::new(),
            MemoryRuleStore::new(),
            out_tx,
        );

        let clean = InboundMessage::new("alice".to_string(), "hello, world.".to_string(), 0);
        let spammy = InboundMessage::new("bob".to_string(), "aaaaaaaaa".to_string(), 10);
        actor
            .tx
            .send(IncMessage::Message(clean))
            .await
            .expect("manager is gone");
        actor
            .tx
            .send(IncMessage::Message(spammy))
            .await
            .expect("manager is gone");

        let mut verdicts = Vec::new();
        for _ in 0..2 {
            let out = out_rx.recv().await.expect("out channel closed early");
            verdicts.push((out.message.author_id.clone(), out.verdict));
        }
        verdicts.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(verdicts[0].0, "alice");
        assert_eq!(verdicts[0].1, Verdict::Clean);
        assert_eq!(verdicts[1].0, "bob");
        assert!(verdicts[1].1.is_spam());

        actor
            .tx
            .send(IncMessage::Close)
            .await
            .expect("manager is gone");
        actor.join_handle.await.expect("manager task panicked");
    }
}
