//! # KvStore Trait
//!
//! The contract between the storefront core and whatever holds its state.

use crate::store::error::StoreError;
use crate::store::message::WriteOp;
use async_trait::async_trait;
use serde_json::Value;

/// Asynchronous string-keyed store of JSON values.
///
/// Implementations must be shareable across tasks; the core holds them as
/// `Arc<dyn KvStore>`.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove `key`. Returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// Every key currently present, sorted.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Apply `writes` in order.
    ///
    /// The provided implementation issues one request per write and stops at
    /// the first failure. Stores that can apply a batch atomically override it.
    async fn commit(&self, writes: Vec<WriteOp>) -> Result<(), StoreError> {
        for write in writes {
            match write {
                WriteOp::Set { key, value } => self.set(&key, value).await?,
                WriteOp::Delete { key } => {
                    self.delete(&key).await?;
                }
            }
        }
        Ok(())
    }
}
