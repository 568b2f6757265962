//! Per-key async mutexes.
//!
//! The store actor serializes individual requests, but a read-modify-write
//! spans several of them. Holding the guard for a key across the whole
//! sequence keeps concurrent callers from interleaving. Callers that need more
//! than one key acquire them in the order cart -> catalog -> orders.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `key`. Released when the guard drops.
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(key.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
