//! # System Lifecycle & Orchestration
//!
//! Starting the storefront means spawning the store actor, wiring every
//! component to a client of it and seeding the store. Stopping it means
//! dropping those clients so the actor's channel closes, then waiting for the
//! actor task to finish.
//!
//! ```rust
//! use storefront_sim::lifecycle::ShopSystem;
//! use storefront_sim::ShopConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = ShopSystem::start(ShopConfig::default()).await.unwrap();
//!
//!     let products = system.storefront.list_products(&Default::default()).await;
//!     assert_eq!(products.pagination.unwrap().total, 15);
//!
//!     system.shutdown().await.unwrap();
//! }
//! ```

pub mod shop_system;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use shop_system::ShopSystem;
