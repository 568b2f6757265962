//! # Order Workflow
//!
//! Turns a cart into an immutable order.
//!
//! ## Placement
//!
//! [`OrderWorkflow::create_order`] holds the caller's cart lock, the catalog
//! lock and the order list lock, in that order, for the whole operation:
//!
//! 1. Read the cart. An empty cart fails with `CartEmpty`.
//! 2. Re-check every line against *current* stock. The first short line fails
//!    the whole operation and nothing is written.
//! 3. Price the cart, pick an unused order id and decrement stock in memory.
//! 4. Commit `[orders, products, cart]` as one batch.
//!
//! Because the cart is emptied in the same batch that records the order, the
//! same cart cannot be ordered twice.

use crate::error::{ApiError, ApiResult};
use crate::ids;
use crate::model::{CartItem, Order, OrderStatus};
use crate::pricing;
use crate::session::SessionManager;
use crate::state::{cart_key, ShopState, ORDERS_KEY, PRODUCTS_KEY};
use chrono::Utc;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct OrderWorkflow {
    state: ShopState,
    sessions: SessionManager,
}

impl OrderWorkflow {
    pub fn new(state: ShopState, sessions: SessionManager) -> Self {
        Self { state, sessions }
    }

    #[instrument(skip(self, token))]
    pub async fn create_order(&self, token: &str) -> ApiResult<Order> {
        let session = self.sessions.require_auth(token, false).await?;
        let user_id = session.user_id;
        let user_cart = cart_key(&user_id);

        let _cart_guard = self.state.lock(&user_cart).await;
        let _catalog_guard = self.state.lock(PRODUCTS_KEY).await;
        let _orders_guard = self.state.lock(ORDERS_KEY).await;

        let items = self.state.cart(&user_id).await?;
        if items.is_empty() {
            return Err(ApiError::CartEmpty);
        }

        let mut requested: HashMap<&str, u32> = HashMap::new();
        for item in &items {
            let wanted = requested.entry(item.product_id.as_str()).or_default();
            *wanted = wanted.saturating_add(item.quantity);
        }

        let mut products = self.state.products().await?;
        for item in &items {
            let wanted = requested[item.product_id.as_str()];
            match products.iter().find(|p| p.id == item.product_id) {
                Some(product) if product.is_listed() && product.stock >= wanted => {}
                found => {
                    let name = found.map_or_else(|| "product".to_string(), |p| p.name.clone());
                    warn!(product_id = %item.product_id, wanted, "Stock check failed");
                    return Err(ApiError::InsufficientStock {
                        product: Some(name),
                    });
                }
            }
        }

        for product in products.iter_mut() {
            if let Some(wanted) = requested.get(product.id.as_str()) {
                product.stock -= wanted;
            }
        }

        let mut orders = self.state.orders().await?;
        let mut id = ids::order_id();
        while orders.iter().any(|o| o.id == id) {
            id = ids::order_id();
        }

        let totals = pricing::compute_totals(&items)?;
        let order = Order {
            id,
            user_id: user_id.clone(),
            items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            shipping: totals.shipping,
            total: totals.total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        orders.push(order.clone());

        self.state
            .commit(vec![
                ShopState::write(ORDERS_KEY, &orders)?,
                ShopState::write(PRODUCTS_KEY, &products)?,
                ShopState::write(&user_cart, &Vec::<CartItem>::new())?,
            ])
            .await?;

        info!(order_id = %order.id, %user_id, total = %order.total, "Order placed");
        Ok(order)
    }

    /// Admin-only. Any status may be set from any other.
    #[instrument(skip(self, token))]
    pub async fn update_order_status(
        &self,
        token: &str,
        order_id: &str,
        status: OrderStatus,
    ) -> ApiResult<Order> {
        self.sessions.require_auth(token, true).await?;

        let _guard = self.state.lock(ORDERS_KEY).await;
        let mut orders = self.state.orders().await?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| ApiError::OrderNotFound(order_id.to_string()))?;
        let previous = order.status;
        order.status = status;
        let updated = order.clone();
        self.state.save_orders(&orders).await?;

        info!(from = %previous, to = %status, "Order status changed");
        Ok(updated)
    }

    /// The caller's own orders, oldest first.
    pub async fn get_orders(&self, token: &str) -> ApiResult<Vec<Order>> {
        let session = self.sessions.require_auth(token, false).await?;
        Ok(self
            .state
            .orders()
            .await?
            .into_iter()
            .filter(|o| o.user_id == session.user_id)
            .collect())
    }

    /// One order. Admins may read any order, customers only their own.
    pub async fn get_order(&self, token: &str, order_id: &str) -> ApiResult<Order> {
        let session = self.sessions.require_auth(token, false).await?;
        let order = self
            .state
            .orders()
            .await?
            .into_iter()
            .find(|o| o.id == order_id)
            .ok_or_else(|| ApiError::OrderNotFound(order_id.to_string()))?;

        if order.user_id != session.user_id && !session.is_admin() {
            return Err(ApiError::AccessDenied);
        }
        Ok(order)
    }
}
