//! # Store Errors
//!
//! Failures of the storage layer itself. Business rule violations never show
//! up here; they are [`ApiError`](crate::error::ApiError)s.

/// Errors that can occur while talking to a [`KvStore`](super::KvStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Malformed value under {key}: {source}")]
    Codec {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Store backend error: {0}")]
    Backend(String),
}
