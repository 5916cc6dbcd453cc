//! In-process accounting store
//!
//! Keeps committed and staged records in memory and journals every call so
//! tests can assert exactly which round trips a command made.

use super::store::{EntityStore, StoreError, StoreResult};
use crate::admin::{AdminEntity, EntityCondition};
use async_trait::async_trait;
use log::debug;

/// One call made against a [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get,
    Create(Vec<String>),
    Commit(bool),
}

pub struct MemoryStore<E> {
    committed: Vec<E>,
    staged: Vec<E>,
    journal: Vec<StoreCall>,
    fail_get: Option<String>,
    fail_create: Option<String>,
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            committed: Vec::new(),
            staged: Vec::new(),
            journal: Vec::new(),
            fail_get: None,
            fail_create: None,
        }
    }
}

impl<E: AdminEntity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<E>) -> Self {
        Self {
            committed: records,
            ..Self::default()
        }
    }

    /// Make every query fail with `message`
    pub fn fail_get(mut self, message: impl Into<String>) -> Self {
        self.fail_get = Some(message.into());
        self
    }

    /// Make every create fail with `message`
    pub fn fail_create(mut self, message: impl Into<String>) -> Self {
        self.fail_create = Some(message.into());
        self
    }

    pub fn records(&self) -> &[E] {
        &self.committed
    }

    pub fn staged(&self) -> &[E] {
        &self.staged
    }

    pub fn journal(&self) -> &[StoreCall] {
        &self.journal
    }
}

#[async_trait]
impl<E: AdminEntity> EntityStore<E> for MemoryStore<E> {
    async fn get(&mut self, condition: &E::Condition) -> StoreResult<Vec<E>> {
        self.journal.push(StoreCall::Get);
        if let Some(message) = &self.fail_get {
            return Err(StoreError::Rejected(message.clone()));
        }
        Ok(self
            .committed
            .iter()
            .chain(self.staged.iter())
            .filter(|record| condition.matches(record))
            .cloned()
            .collect())
    }

    async fn create(&mut self, records: &[E]) -> StoreResult<()> {
        let names = records.iter().map(|record| record.name().to_string()).collect();
        self.journal.push(StoreCall::Create(names));
        if let Some(message) = &self.fail_create {
            return Err(StoreError::Rejected(message.clone()));
        }
        self.staged.extend_from_slice(records);
        Ok(())
    }

    async fn commit(&mut self, apply: bool) -> StoreResult<()> {
        self.journal.push(StoreCall::Commit(apply));
        if apply {
            debug!("Committing {} staged {}(s)", self.staged.len(), E::NOUN);
            self.committed.append(&mut self.staged);
        } else {
            debug!("Discarding {} staged {}(s)", self.staged.len(), E::NOUN);
            self.staged.clear();
        }
        Ok(())
    }
}
