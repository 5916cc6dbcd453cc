//! Accounting storage interface
//!
//! The add and list commands only talk to the accounting service through
//! [`EntityStore`]: one query, one batch create and an explicit commit or
//! rollback.

use crate::admin::AdminEntity;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unable to reach accounting service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Accounting service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response from accounting service: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait EntityStore<E: AdminEntity>: Send {
    /// Records matching `condition`; an absent name list matches every name
    async fn get(&mut self, condition: &E::Condition) -> StoreResult<Vec<E>>;

    /// Stage `records` for creation
    async fn create(&mut self, records: &[E]) -> StoreResult<()>;

    /// Apply (`true`) or roll back (`false`) staged changes
    async fn commit(&mut self, apply: bool) -> StoreResult<()>;
}
