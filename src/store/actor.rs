//! # Store Actor
//!
//! The server half of the bundled key-value store. It owns every entry and the
//! receiver end of the request channel.

use crate::store::client::StoreClient;
use crate::store::message::{StoreRequest, WriteOp};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Single-writer key-value store.
///
/// **Concurrency Model**:
/// The actor processes its messages *sequentially* in one loop, so the map
/// needs no `Mutex`. Each request is applied in arrival order and a
/// `Commit` batch is applied in full before the next message is read, which
/// makes batches atomic for every observer.
///
/// # Usage Pattern
///
/// 1. **Create**: `StoreActor::new()` returns the actor and its [`StoreClient`].
/// 2. **Run**: spawn `actor.run()` on the runtime.
/// 3. **Use**: clone the client wherever state is needed. The actor stops once
///    every client has been dropped.
///
/// ```rust
/// use storefront_sim::store::{KvStore, StoreActor};
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::new(16);
///     tokio::spawn(actor.run());
///
///     client.set("greeting", serde_json::json!("hello")).await.unwrap();
///     let value = client.get("greeting").await.unwrap();
///     assert_eq!(value, Some(serde_json::json!("hello")));
/// }
/// ```
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    entries: HashMap<String, Value>,
}

impl StoreActor {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full,
    /// callers wait for space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            entries: HashMap::new(),
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the event loop until every client is gone.
    pub async fn run(mut self) {
        info!("Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Get { key, respond_to } => {
                    let value = self.entries.get(&key).cloned();
                    debug!(%key, found = value.is_some(), "Get");
                    let _ = respond_to.send(Ok(value));
                }
                StoreRequest::Set {
                    key,
                    value,
                    respond_to,
                } => {
                    self.entries.insert(key.clone(), value);
                    debug!(%key, size = self.entries.len(), "Set");
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Delete { key, respond_to } => {
                    let existed = self.entries.remove(&key).is_some();
                    debug!(%key, existed, "Delete");
                    let _ = respond_to.send(Ok(existed));
                }
                StoreRequest::Keys { respond_to } => {
                    let mut keys: Vec<String> = self.entries.keys().cloned().collect();
                    keys.sort();
                    debug!(count = keys.len(), "Keys");
                    let _ = respond_to.send(Ok(keys));
                }
                StoreRequest::Commit { writes, respond_to } => {
                    let count = writes.len();
                    for write in writes {
                        self.apply(write);
                    }
                    debug!(writes = count, size = self.entries.len(), "Commit");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(size = self.entries.len(), "Shutdown");
    }

    fn apply(&mut self, write: WriteOp) {
        match write {
            WriteOp::Set { key, value } => {
                self.entries.insert(key, value);
            }
            WriteOp::Delete { key } => {
                self.entries.remove(&key);
            }
        }
    }
}
