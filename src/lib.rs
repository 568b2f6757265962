//! # Storefront Simulator
//!
//! > **A simulated online-store backend on top of a single-writer store actor.**
//!
//! The crate exposes the request/response operations of a small storefront
//! (authentication, catalog browsing, carts, order placement and admin
//! reporting) as async library calls. All durable state lives in a key-value
//! store behind the [`KvStore`](store::KvStore) trait; the bundled
//! implementation is an actor that owns every entry and applies requests one
//! at a time.
//!
//! ## 🏗️ Guarantees
//!
//! - **Stock never goes negative.** Cart mutations are checked against the
//!   catalog, and order placement re-checks every line under the catalog lock.
//! - **A cart can't be ordered twice.** The order, the new stock levels and
//!   the emptied cart are committed as one atomic batch.
//! - **Sessions expire.** Tokens carry an absolute expiry and are cleared the
//!   first time they are presented late.
//! - **Admin operations are gated.** Catalog writes, status changes and
//!   reports require an admin session.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Store ([`store`])
//! - **Role**: The key-value collaborator. [`StoreActor`](store::StoreActor)
//!   processes messages sequentially; [`KeyLocks`](store::KeyLocks) guards
//!   read-modify-write sequences that span several messages.
//! - **Testing**: [`store::mock`] scripts store answers for failure injection.
//!
//! ### 2. The Components
//! - [`session`] issues and validates tokens.
//! - [`catalog`] lists products and applies admin edits.
//! - [`cart`] keeps per-user carts.
//! - [`orders`] places orders and updates their status.
//! - [`admin`] aggregates summary statistics.
//!
//! ### 3. The Facade ([`api`])
//! - **Role**: [`Storefront`] runs one component operation per call and folds
//!   the result into an [`ApiResponse`].
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: [`ShopSystem`] spawns the store actor, wires the components,
//!   seeds data and shuts down cleanly.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo session with info logs
//! RUST_LOG=info cargo run
//! ```
//!
//! Configuration is read from `SHOP_*` environment variables, see [`config`].

pub mod admin;
pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod model;
pub mod orders;
pub mod pricing;
pub mod response;
pub mod seed;
pub mod session;
pub mod state;
pub mod store;

pub use api::Storefront;
pub use config::ShopConfig;
pub use error::{ApiError, ApiResult};
pub use lifecycle::ShopSystem;
pub use response::{ApiResponse, Pagination};
