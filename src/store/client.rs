//! # Store Client
//!
//! The cloneable handle used to reach a [`StoreActor`](super::StoreActor).

use crate::store::error::StoreError;
use crate::store::kv::KvStore;
use crate::store::message::{StoreRequest, WriteOp};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

/// Forwards [`KvStore`] calls to the store actor over an mpsc channel and
/// waits for the answer on a oneshot channel.
///
/// Holds only a sender, so cloning is inexpensive.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl KvStore for StoreClient {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get {
                key: key.to_string(),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Set {
                key: key.to_string(),
                value,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete {
                key: key.to_string(),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Keys { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    async fn commit(&self, writes: Vec<WriteOp>) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Commit { writes, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}
