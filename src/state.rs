//! # Shop State
//!
//! Typed access to the persisted key layout.
//!
//! | key | contents |
//! |-----|----------|
//! | `api_products` | catalog, `Vec<Product>` |
//! | `api_users` | `Vec<User>` |
//! | `api_orders` | every order, insertion ordered |
//! | `api_cart_<userId>` | that user's `Vec<CartItem>` |
//! | `api_session_<token>` | the [`Session`] behind a token |
//!
//! Components never touch raw JSON; they go through the loaders and savers
//! here, and take the matching [`KeyLocks`] guard around any read-modify-write.

use crate::model::{CartItem, Order, Product, Session, User};
use crate::seed;
use crate::store::{KeyLocks, KvStore, StoreError, WriteOp};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use tracing::info;

pub const PRODUCTS_KEY: &str = "api_products";
pub const USERS_KEY: &str = "api_users";
pub const ORDERS_KEY: &str = "api_orders";
pub const CART_PREFIX: &str = "api_cart_";
pub const SESSION_PREFIX: &str = "api_session_";

pub fn cart_key(user_id: &str) -> String {
    format!("{CART_PREFIX}{user_id}")
}

pub fn session_key(token: &str) -> String {
    format!("{SESSION_PREFIX}{token}")
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|source| StoreError::Codec {
        key: key.to_string(),
        source,
    })
}

/// Store handle plus the lock table, shared by every component.
#[derive(Clone)]
pub struct ShopState {
    store: Arc<dyn KvStore>,
    locks: Arc<KeyLocks>,
}

impl ShopState {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            locks: Arc::new(KeyLocks::new()),
        }
    }

    /// Exclusive access to `key` until the guard drops.
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        self.locks.lock(key).await
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.store.get(key).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StoreError::Codec {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.store.set(key, encode(key, value)?).await
    }

    /// Encodes `value` as a pending write for [`commit`](Self::commit).
    pub fn write<T: Serialize>(key: &str, value: &T) -> Result<WriteOp, StoreError> {
        Ok(WriteOp::set(key, encode(key, value)?))
    }

    pub async fn commit(&self, writes: Vec<WriteOp>) -> Result<(), StoreError> {
        self.store.commit(writes).await
    }

    pub async fn products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.load(PRODUCTS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_products(&self, products: &[Product]) -> Result<(), StoreError> {
        self.save(PRODUCTS_KEY, &products).await
    }

    pub async fn users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.load(USERS_KEY).await?.unwrap_or_default())
    }

    pub async fn orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.load(ORDERS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_orders(&self, orders: &[Order]) -> Result<(), StoreError> {
        self.save(ORDERS_KEY, &orders).await
    }

    pub async fn cart(&self, user_id: &str) -> Result<Vec<CartItem>, StoreError> {
        Ok(self.load(&cart_key(user_id)).await?.unwrap_or_default())
    }

    pub async fn save_cart(&self, user_id: &str, items: &[CartItem]) -> Result<(), StoreError> {
        self.save(&cart_key(user_id), &items).await
    }

    pub async fn session(&self, token: &str) -> Result<Option<Session>, StoreError> {
        self.load(&session_key(token)).await
    }

    pub async fn save_session(&self, token: &str, session: &Session) -> Result<(), StoreError> {
        self.save(&session_key(token), session).await
    }

    pub async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        self.store.delete(&session_key(token)).await.map(|_| ())
    }

    /// Every stored key that starts with `prefix`.
    pub async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let keys = self.store.keys().await?;
        Ok(keys.into_iter().filter(|k| k.starts_with(prefix)).collect())
    }

    /// Installs seed data under any of the catalog, user and order keys that
    /// are still empty. Existing data is left alone.
    pub async fn seed_missing(&self) -> Result<(), StoreError> {
        let mut writes = Vec::new();
        if self.store.get(PRODUCTS_KEY).await?.is_none() {
            writes.push(Self::write(PRODUCTS_KEY, &seed::sample_products())?);
        }
        if self.store.get(USERS_KEY).await?.is_none() {
            writes.push(Self::write(USERS_KEY, &seed::test_users())?);
        }
        if self.store.get(ORDERS_KEY).await?.is_none() {
            writes.push(Self::write(ORDERS_KEY, &Vec::<Order>::new())?);
        }

        if !writes.is_empty() {
            info!(keys = writes.len(), "Seeding store");
            self.commit(writes).await?;
        }
        Ok(())
    }
}
