//! # Key-Value Store
//!
//! All durable state of the storefront (catalog, users, orders, carts and
//! sessions) lives behind the [`KvStore`] trait: an asynchronous
//! get/set/delete/list-keys store keyed by string and holding JSON values.
//!
//! ## Main Components
//!
//! - [`KvStore`] - The trait the rest of the crate talks to.
//! - [`StoreActor`] - The bundled in-process store. It owns every entry and
//!   processes requests *sequentially* in its own Tokio task.
//! - [`StoreClient`] - Cheap, cloneable handle that forwards requests to the actor.
//! - [`KeyLocks`] - Per-key async mutexes guarding read-modify-write sequences
//!   that span several store requests.
//! - [`mock`] - A scripted store for failure-injection tests.
//!
//! ## Batches
//!
//! [`KvStore::commit`] applies a list of [`WriteOp`]s. The default implementation
//! applies them one at a time, in order. [`StoreClient`] overrides it and ships
//! the whole batch as a single message, so the actor applies it atomically with
//! respect to every other request.

pub mod actor;
pub mod client;
pub mod error;
pub mod kv;
pub mod locks;
pub mod message;
pub mod mock;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::StoreError;
pub use kv::KvStore;
pub use locks::KeyLocks;
pub use message::{Response, StoreRequest, WriteOp};
