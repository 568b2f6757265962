//! # Store Messages
//!
//! The request type exchanged between [`StoreClient`](super::StoreClient) and
//! [`StoreActor`](super::StoreActor), plus the [`WriteOp`] used by batch commits.

use crate::store::error::StoreError;
use serde_json::Value;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// A single write inside a batch commit.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Set { key: String, value: Value },
    Delete { key: String },
}

impl WriteOp {
    pub fn set(key: impl Into<String>, value: Value) -> Self {
        Self::Set {
            key: key.into(),
            value,
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self::Delete { key: key.into() }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// Internal message type sent to the store actor.
///
/// The variants map one-to-one onto the [`KvStore`](super::KvStore) methods.
/// `Commit` carries a whole batch so the actor can apply it without any other
/// request interleaving.
#[derive(Debug)]
pub enum StoreRequest {
    Get {
        key: String,
        respond_to: Response<Option<Value>>,
    },
    Set {
        key: String,
        value: Value,
        respond_to: Response<()>,
    },
    Delete {
        key: String,
        respond_to: Response<bool>,
    },
    Keys {
        respond_to: Response<Vec<String>>,
    },
    Commit {
        writes: Vec<WriteOp>,
        respond_to: Response<()>,
    },
}
