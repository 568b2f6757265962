//! # Mock Store & Testing Guide
//!
//! [`MockStore`] hands out a regular [`StoreClient`], but the requests it sends
//! are answered from a queue of scripted expectations instead of a real
//! [`StoreActor`](super::StoreActor). Use it to simulate storage failures that
//! are hard to reproduce against the real store.
//!
//! | Feature | MockStore | StoreActor |
//! |---------|-----------|------------|
//! | **State** | None, answers are scripted | Real entries |
//! | **Determinism** | Exact request sequence is asserted | Subject to scheduler |
//! | **Error Injection** | `return_err` on any step | Not possible |
//!
//! ```rust
//! use storefront_sim::store::mock::MockStore;
//! use storefront_sim::store::{KvStore, StoreError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::new();
//!     mock.expect_get("api_products")
//!         .return_err(StoreError::Backend("disk unavailable".into()));
//!
//!     let client = mock.client();
//!     assert!(client.get("api_products").await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! Expectations match on the request kind and on a key *prefix*, so a session
//! write can be expected as `expect_set("api_session_")` without knowing the
//! random token.
//!
//! For step-by-step control use [`create_mock_client`] together with
//! [`next_request`] and answer each request by hand.

use crate::store::client::StoreClient;
use crate::store::error::StoreError;
use crate::store::message::StoreRequest;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation {
    Get {
        key: String,
        response: Result<Option<Value>, StoreError>,
    },
    Set {
        key: String,
        response: Result<(), StoreError>,
    },
    Delete {
        key: String,
        response: Result<bool, StoreError>,
    },
    Keys {
        response: Result<Vec<String>, StoreError>,
    },
    Commit {
        response: Result<(), StoreError>,
    },
}

#[derive(Default)]
struct Script {
    expectations: VecDeque<Expectation>,
    mismatches: Vec<String>,
}

/// A scripted store with expectation tracking.
pub struct MockStore {
    client: StoreClient,
    script: Arc<Mutex<Script>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest>(100);
        let script = Arc::new(Mutex::new(Script::default()));
        let script_clone = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut script = script_clone.lock().unwrap();
                let expectation = script.expectations.pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Get { key, respond_to },
                        Some(Expectation::Get { key: want, response }),
                    ) if key.starts_with(&want) =>
                    {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Set { key, respond_to, .. },
                        Some(Expectation::Set { key: want, response }),
                    ) if key.starts_with(&want) =>
                    {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { key, respond_to },
                        Some(Expectation::Delete { key: want, response }),
                    ) if key.starts_with(&want) =>
                    {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Keys { respond_to }, Some(Expectation::Keys { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Commit { respond_to, .. },
                        Some(Expectation::Commit { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        // Dropping the responder surfaces as ActorDropped to the caller.
                        script.mismatches.push(format!("{:?}", request));
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient {
        self.client.clone()
    }

    pub fn expect_get(&mut self, key: &str) -> GetExpectation {
        GetExpectation {
            key: key.to_string(),
            script: self.script.clone(),
        }
    }

    pub fn expect_set(&mut self, key: &str) -> UnitExpectation {
        UnitExpectation {
            key: Some(key.to_string()),
            script: self.script.clone(),
        }
    }

    pub fn expect_delete(&mut self, key: &str) -> DeleteExpectation {
        DeleteExpectation {
            key: key.to_string(),
            script: self.script.clone(),
        }
    }

    pub fn expect_keys(&mut self) -> KeysExpectation {
        KeysExpectation {
            script: self.script.clone(),
        }
    }

    pub fn expect_commit(&mut self) -> UnitExpectation {
        UnitExpectation {
            key: None,
            script: self.script.clone(),
        }
    }

    /// Panics unless every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let script = self.script.lock().unwrap();
        if !script.mismatches.is_empty() {
            panic!("Unexpected store requests: {:?}", script.mismatches);
        }
        if !script.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expectations.len()
            );
        }
    }
}

pub struct GetExpectation {
    key: String,
    script: Arc<Mutex<Script>>,
}

impl GetExpectation {
    pub fn return_ok(self, value: Option<Value>) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Option<Value>, StoreError>) {
        let mut script = self.script.lock().unwrap();
        script.expectations.push_back(Expectation::Get {
            key: self.key,
            response,
        });
    }
}

/// Builder for `set` (keyed) and `commit` (unkeyed) expectations.
pub struct UnitExpectation {
    key: Option<String>,
    script: Arc<Mutex<Script>>,
}

impl UnitExpectation {
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), StoreError>) {
        let expectation = match self.key {
            Some(key) => Expectation::Set { key, response },
            None => Expectation::Commit { response },
        };
        self.script.lock().unwrap().expectations.push_back(expectation);
    }
}

pub struct DeleteExpectation {
    key: String,
    script: Arc<Mutex<Script>>,
}

impl DeleteExpectation {
    pub fn return_ok(self, existed: bool) {
        self.push(Ok(existed));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<bool, StoreError>) {
        let mut script = self.script.lock().unwrap();
        script.expectations.push_back(Expectation::Delete {
            key: self.key,
            response,
        });
    }
}

pub struct KeysExpectation {
    script: Arc<Mutex<Script>>,
}

impl KeysExpectation {
    pub fn return_ok(self, keys: Vec<String>) {
        self.push(Ok(keys));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<String>, StoreError>) {
        let mut script = self.script.lock().unwrap();
        script.expectations.push_back(Expectation::Keys { response });
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client together with the receiver its requests arrive on.
pub fn create_mock_client(buffer_size: usize) -> (StoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Waits for the next request sent by a client from [`create_mock_client`].
pub async fn next_request(receiver: &mut mpsc::Receiver<StoreRequest>) -> Option<StoreRequest> {
    receiver.recv().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KvStore, WriteOp};
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_answers_in_order() {
        let mut mock = MockStore::new();
        mock.expect_get("api_users").return_ok(Some(json!([])));
        mock.expect_set("api_session_").return_ok();
        mock.expect_commit()
            .return_err(StoreError::Backend("write failed".into()));

        let client = mock.client();
        assert_eq!(client.get("api_users").await.unwrap(), Some(json!([])));
        client.set("api_session_abc", json!({})).await.unwrap();
        let committed = client.commit(vec![WriteOp::delete("x")]).await;
        assert!(matches!(committed, Err(StoreError::Backend(_))));

        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_is_dropped() {
        let mut mock = MockStore::new();
        mock.expect_get("api_orders").return_ok(None);

        let client = mock.client();
        let result = client.get("api_products").await;
        assert!(matches!(result, Err(StoreError::ActorDropped)));
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_leftovers() {
        let mut mock = MockStore::new();
        mock.expect_keys().return_ok(vec![]);
        mock.verify();
    }
}
