use async_trait::async_trait;
use thiserror::Error;

use crate::types::CustomRule;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Backing store is unavailable: {0}")]
    Unavailable(String),
}

/// Source of the banned-word set. Implementations may fail transiently;
/// the caches keep serving the last good snapshot when they do.
#[async_trait]
pub trait WordStore: Send + Sync + 'static {
    async fn fetch_all(&self) -> Result<Vec<String>, StoreError>;
}

/// Source of the operator-maintained regex rules.
#[async_trait]
pub trait RuleStore: Send + Sync + 'static {
    async fn fetch_all(&self) -> Result<Vec<CustomRule>, StoreError>;
}
