//! Accounting service client over HTTP
//!
//! Records are exchanged as JSON objects keyed by the collection name, for
//! example `{"federations": [{"name": "fed1", "flags": 0}]}`.

use super::constants::{USER_AGENT, collection_endpoint, commit_endpoint};
use super::store::{EntityStore, StoreError, StoreResult};
use crate::admin::{AdminEntity, EntityCondition};
use crate::config::StorageConfig;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::time::Duration;

pub struct RestStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestStore {
    pub fn new(storage: &StorageConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(storage.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: storage.url.clone(),
            token: storage.token.clone(),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: Response) -> StoreResult<Response> {
        let status = response.status();
        debug!("Accounting service responded with {}", status);
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(StoreError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl<E> EntityStore<E> for RestStore
where
    E: AdminEntity + Serialize + DeserializeOwned,
{
    async fn get(&mut self, condition: &E::Condition) -> StoreResult<Vec<E>> {
        let url = collection_endpoint(&self.base_url, E::COLLECTION);
        let query = condition.query_pairs();
        debug!("GET {} {:?}", url, query);

        let request = self.authorize(self.client.get(&url).query(&query));
        let response = Self::check(request.send().await?).await?;

        let mut body: Map<String, Value> = response.json().await?;
        let records = body.remove(E::COLLECTION).ok_or_else(|| {
            StoreError::Decode(serde::de::Error::missing_field(E::COLLECTION))
        })?;
        let records: Vec<E> = serde_json::from_value(records)?;
        debug!("Fetched {} {}(s)", records.len(), E::NOUN);
        Ok(records)
    }

    async fn create(&mut self, records: &[E]) -> StoreResult<()> {
        let url = collection_endpoint(&self.base_url, E::COLLECTION);
        let mut body = Map::new();
        body.insert(E::COLLECTION.to_string(), serde_json::to_value(records)?);
        info!("Creating {} {}(s)", records.len(), E::NOUN);

        let request = self.authorize(self.client.post(&url).json(&body));
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn commit(&mut self, apply: bool) -> StoreResult<()> {
        let url = commit_endpoint(&self.base_url);
        if apply {
            info!("Committing changes");
        } else {
            warn!("Rolling back changes");
        }

        let request = self.authorize(self.client.post(&url).json(&json!({ "apply": apply })));
        Self::check(request.send().await?).await?;
        Ok(())
    }
}
