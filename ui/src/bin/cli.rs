use std::time::Duration;

use detector::ClassifierManager;
use shared::classifier_params::ClassifierParams;
use shared::messages::classifier::IncMessage;
use shared::types::{InboundMessage, Verdict};
use stores::memory::{MemoryRuleStore, MemoryWordStore};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::Level;

#[tokio::main]
pub async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let word_store = MemoryWordStore::new();
    word_store.add_word("viagra").await;
    word_store.add_word("casino").await;

    let rule_store = MemoryRuleStore::new();
    rule_store
        .add_rule(r"join\s+my\s+server", "Server advertising")
        .await;
    // Deliberately malformed, to show that a broken rule is skipped
    // without taking the others down
    rule_store.add_rule(r"(unclosed", "broken rule").await;

    let (out_tx, mut out_rx) = mpsc::channel(32);
    let actor = ClassifierManager::init(
        ClassifierParams::default(),
        word_store,
        rule_store,
        out_tx,
    );

    let actor_tx = actor.tx;
    let actor_handle = actor.join_handle;

    let rx_reader = tokio::spawn(async move {
        while let Some(out_message) = out_rx.recv().await {
            match &out_message.verdict {
                Verdict::Clean => {
                    tracing::info!(
                        "<{}> is clean: {}",
                        out_message.message.author_id,
                        out_message.message.content
                    );
                }
                Verdict::Spam { reason } => {
                    tracing::info!(
                        "<{}> flagged ({}): {}",
                        out_message.message.author_id,
                        reason,
                        out_message.message.content
                    );
                }
            }
        }

        tracing::info!("rx_reader has been closed");
    });

    let samples = vec![
        ("alice", "good morning, friends."),
        ("bob", "BUY CHEAP GOLD NOW, ONLY TODAY"),
        ("carol", "a special giveaway, act fast!"),
        ("dave", "check this out, it's urgent"),
        ("dave", "check this out, it's urgent"),
        ("erin", "selling cheap viagra, dm me."),
        ("frank", "come join my server, friends!"),
        ("grace", "hahahaha"),
    ];

    for (author, content) in samples {
        let message = InboundMessage::new(
            author.to_string(),
            content.to_string(),
            chrono::Utc::now().timestamp_millis(),
        );
        match actor_tx.send(IncMessage::Message(message)).await {
            Ok(_r) => {}
            Err(e) => {
                tracing::error!("Couldn't send message to the classifier: {}", &e);
                return;
            }
        }
    }

    sleep(Duration::from_millis(500)).await;
    tracing::info!("Closing...");
    match actor_tx.send(IncMessage::Close).await {
        Ok(_r) => {}
        Err(e) => {
            tracing::error!("Couldn't send close message to the classifier: {}", &e);
            return;
        }
    }

    let _ = actor_handle.await;
    let _ = rx_reader.await;

    tracing::info!("Closed");
}
