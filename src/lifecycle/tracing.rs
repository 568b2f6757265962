//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing-subscriber` formatter used by the
//! binary. Library code only emits events; it never installs a subscriber.
//!
//! ## Configuration
//!
//! The level comes from `RUST_LOG`. The format is compact and hides the
//! module prefix (`with_target(false)`), so spans show inline as
//! `create_order:` before the event.
//!
//! ```bash
//! # Operations, logins and placed orders
//! RUST_LOG=info cargo run
//!
//! # Every store request as well
//! RUST_LOG=debug cargo run
//!
//! # Only the store actor
//! RUST_LOG=storefront_sim::store=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Store actor**: `Store started`, each request at `debug`, and `Shutdown`
//!   with the final key count
//! - **Operations**: `#[instrument]` spans carrying product, order and user ids
//! - **Rejections**: `warn` with the error, e.g. `Request rejected error=Cart is empty`
//! - **Store failures**: `error` with the underlying cause and the
//!   `Failed to ...` message the caller received
//!
//! ## Order Placement Trace
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! DEBUG create_order: Get key="api_session_mock_jwt_2_..." found=true
//! DEBUG create_order: Get key="api_cart_2" found=true
//! DEBUG create_order: Get key="api_products" found=true
//! DEBUG create_order: Get key="api_orders" found=true
//! DEBUG create_order: Commit writes=3 size=6
//!  INFO create_order: Order placed order_id="ORD-1760000000000-K3QZ" user_id="2" total=215.9784
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
