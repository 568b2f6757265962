//! # Storefront Facade
//!
//! The operation surface callers use. Each method runs one component
//! operation and folds the outcome into an [`ApiResponse`]:
//!
//! - success carries the payload and, for mutations, a confirmation message;
//! - a rejected request carries the error's own message (`Cart is empty`);
//! - a store failure carries an operation-specific `Failed to ...` message,
//!   and the underlying error is logged.
//!
//! Nothing here panics on bad input or a broken store.
//!
//! ```rust
//! use storefront_sim::{ShopConfig, ShopSystem};
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = ShopSystem::start(ShopConfig::default()).await.unwrap();
//!     let shop = &system.storefront;
//!
//!     let login = shop.login("user@test.com", "user123").await;
//!     let token = login.data.unwrap().token;
//!
//!     let added = shop.add_to_cart(&token, "1", 2).await;
//!     assert_eq!(added.message.as_deref(), Some("Item added to cart"));
//!
//!     let order = shop.create_order(&token).await;
//!     assert!(order.success);
//!
//!     system.shutdown().await.unwrap();
//! }
//! ```

use crate::admin::{AdminReports, Stats};
use crate::cart::{CartChange, CartService};
use crate::catalog::{Catalog, ProductFilter};
use crate::config::ShopConfig;
use crate::error::{ApiError, ApiResult};
use crate::model::{
    CartView, LoginData, Order, OrderStatus, Product, ProductCreate, ProductUpdate, User,
};
use crate::orders::OrderWorkflow;
use crate::response::ApiResponse;
use crate::seed;
use crate::session::SessionManager;
use crate::state::{
    cart_key, ShopState, CART_PREFIX, ORDERS_KEY, PRODUCTS_KEY, SESSION_PREFIX, USERS_KEY,
};
use crate::store::{KvStore, StoreError, WriteOp};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct Storefront {
    state: ShopState,
    simulated_latency: bool,
    pub(crate) sessions: SessionManager,
    pub(crate) catalog: Catalog,
    pub(crate) carts: CartService,
    pub(crate) orders: OrderWorkflow,
    pub(crate) admin: AdminReports,
}

impl Storefront {
    /// Wires every component to `store`. Call [`initialize`](Self::initialize)
    /// before first use to seed an empty store.
    pub fn new(store: Arc<dyn KvStore>, config: &ShopConfig) -> Self {
        let state = ShopState::new(store);
        let sessions = SessionManager::new(state.clone(), config.session_ttl);
        let catalog = Catalog::new(state.clone(), sessions.clone());
        let carts = CartService::new(state.clone(), sessions.clone(), catalog.clone());
        let orders = OrderWorkflow::new(state.clone(), sessions.clone());
        let admin = AdminReports::new(state.clone(), sessions.clone(), config.low_stock_threshold);

        Self {
            state,
            simulated_latency: config.simulated_latency,
            sessions,
            catalog,
            carts,
            orders,
            admin,
        }
    }

    /// Seeds catalog, users and orders where the store has none yet.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.state.seed_missing().await
    }

    async fn pause(&self, millis: u64) {
        if self.simulated_latency {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    // =========================================================================
    // Auth
    // =========================================================================

    pub async fn login(&self, email: &str, password: &str) -> ApiResponse<LoginData> {
        self.pause(300).await;
        let result = self.sessions.login(email, password).await;
        reply(result, Some("Login successful"), "Login failed")
    }

    pub async fn logout(&self, token: &str) -> ApiResponse<()> {
        self.pause(100).await;
        let result = self.sessions.logout(token).await;
        done(result, "Logout successful", "Logout failed")
    }

    pub async fn get_current_user(&self, token: &str) -> ApiResponse<User> {
        self.pause(100).await;
        let result = self.sessions.current_user(token).await;
        reply(result, None, "Failed to get user")
    }

    pub async fn is_authenticated(&self, token: &str) -> ApiResponse<bool> {
        let result = self.sessions.is_authenticated(token).await;
        reply(result, None, "Failed to get user")
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub async fn list_products(&self, filter: &ProductFilter) -> ApiResponse<Vec<Product>> {
        self.pause(200).await;
        match self.catalog.list_products(filter).await {
            Ok(page) => ApiResponse::ok(page.products).with_pagination(page.pagination),
            Err(e) => reject(e, "Failed to fetch products"),
        }
    }

    pub async fn get_product(&self, id: &str) -> ApiResponse<Product> {
        self.pause(150).await;
        let result = self.catalog.get_product(id).await;
        reply(result, None, "Failed to fetch product")
    }

    pub async fn list_categories(&self) -> ApiResponse<Vec<String>> {
        ApiResponse::ok(self.catalog.categories())
    }

    pub async fn create_product(&self, token: &str, data: ProductCreate) -> ApiResponse<Product> {
        self.pause(300).await;
        let result = self.catalog.create_product(token, data).await;
        reply(result, Some("Product created successfully"), "Failed to create product")
    }

    pub async fn update_product(
        &self,
        token: &str,
        id: &str,
        update: ProductUpdate,
    ) -> ApiResponse<Product> {
        self.pause(300).await;
        let result = self.catalog.update_product(token, id, update).await;
        reply(result, Some("Product updated successfully"), "Failed to update product")
    }

    pub async fn delete_product(&self, token: &str, id: &str) -> ApiResponse<()> {
        self.pause(200).await;
        let result = self.catalog.delete_product(token, id).await;
        done(result, "Product deleted successfully", "Failed to delete product")
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub async fn get_cart(&self, token: &str) -> ApiResponse<CartView> {
        self.pause(150).await;
        let result = self.carts.get_cart(token).await;
        reply(result, None, "Failed to fetch cart")
    }

    pub async fn add_to_cart(
        &self,
        token: &str,
        product_id: &str,
        quantity: u32,
    ) -> ApiResponse<()> {
        self.pause(200).await;
        let result = self.carts.add_to_cart(token, product_id, quantity).await;
        done(result, "Item added to cart", "Failed to add item to cart")
    }

    /// A quantity of zero or less removes the line.
    pub async fn update_cart_item(
        &self,
        token: &str,
        product_id: &str,
        quantity: i64,
    ) -> ApiResponse<()> {
        self.pause(200).await;
        match self.carts.update_cart_item(token, product_id, quantity).await {
            Ok(CartChange::Updated) => ApiResponse::empty().with_message("Cart updated"),
            Ok(CartChange::Removed) => ApiResponse::empty().with_message("Item removed from cart"),
            Err(e) => reject(e, "Failed to update cart"),
        }
    }

    pub async fn remove_from_cart(&self, token: &str, product_id: &str) -> ApiResponse<()> {
        self.pause(150).await;
        let result = self.carts.remove_from_cart(token, product_id).await;
        done(result, "Item removed from cart", "Failed to remove item")
    }

    pub async fn clear_cart(&self, token: &str) -> ApiResponse<()> {
        self.pause(100).await;
        let result = self.carts.clear_cart(token).await;
        done(result, "Cart cleared", "Failed to clear cart")
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub async fn get_orders(&self, token: &str) -> ApiResponse<Vec<Order>> {
        self.pause(200).await;
        let result = self.orders.get_orders(token).await;
        reply(result, None, "Failed to fetch orders")
    }

    pub async fn get_order(&self, token: &str, order_id: &str) -> ApiResponse<Order> {
        self.pause(150).await;
        let result = self.orders.get_order(token, order_id).await;
        reply(result, None, "Failed to fetch order")
    }

    pub async fn create_order(&self, token: &str) -> ApiResponse<Order> {
        self.pause(400).await;
        let result = self.orders.create_order(token).await;
        reply(result, Some("Order created successfully"), "Failed to create order")
    }

    pub async fn update_order_status(
        &self,
        token: &str,
        order_id: &str,
        status: OrderStatus,
    ) -> ApiResponse<Order> {
        self.pause(200).await;
        let result = self.orders.update_order_status(token, order_id, status).await;
        reply(result, Some("Order status updated"), "Failed to update order status")
    }

    // =========================================================================
    // Admin
    // =========================================================================

    pub async fn get_all_orders(&self, token: &str) -> ApiResponse<Vec<Order>> {
        self.pause(300).await;
        let result = self.admin.all_orders(token).await;
        reply(result, None, "Failed to fetch orders")
    }

    pub async fn get_all_users(&self, token: &str) -> ApiResponse<Vec<User>> {
        self.pause(200).await;
        let result = self.admin.all_users(token).await;
        reply(result, None, "Failed to fetch users")
    }

    pub async fn get_stats(&self, token: &str) -> ApiResponse<Stats> {
        self.pause(250).await;
        let result = self.admin.stats(token).await;
        reply(result, None, "Failed to fetch stats")
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Restores catalog and users to the seed, and drops every order, cart
    /// and session in one batch.
    pub async fn reset_data(&self) -> ApiResponse<()> {
        let result = self.reset().await;
        done(result, "Data reset successfully", "Failed to reset data")
    }

    async fn reset(&self) -> ApiResult<()> {
        // Every cart a mutation could be holding, locked before the catalog.
        let mut carts: BTreeSet<String> = self
            .state
            .keys_with_prefix(CART_PREFIX)
            .await?
            .into_iter()
            .collect();
        for user in self.state.users().await?.iter().chain(&seed::test_users()) {
            carts.insert(cart_key(&user.id));
        }
        let mut cart_guards = Vec::with_capacity(carts.len());
        for key in &carts {
            cart_guards.push(self.state.lock(key).await);
        }
        let _catalog_guard = self.state.lock(PRODUCTS_KEY).await;
        let _orders_guard = self.state.lock(ORDERS_KEY).await;

        let mut writes = vec![
            ShopState::write(PRODUCTS_KEY, &seed::sample_products())?,
            ShopState::write(USERS_KEY, &seed::test_users())?,
            ShopState::write(ORDERS_KEY, &Vec::<Order>::new())?,
        ];
        let mut dropped = 0;
        for prefix in [CART_PREFIX, SESSION_PREFIX] {
            for key in self.state.keys_with_prefix(prefix).await? {
                writes.push(WriteOp::delete(key));
                dropped += 1;
            }
        }
        self.state.commit(writes).await?;

        info!(dropped, "Data reset");
        Ok(())
    }
}

fn reply<T>(result: ApiResult<T>, success: Option<&str>, failed: &str) -> ApiResponse<T> {
    match (result, success) {
        (Ok(data), Some(message)) => ApiResponse::ok(data).with_message(message),
        (Ok(data), None) => ApiResponse::ok(data),
        (Err(e), _) => reject(e, failed),
    }
}

fn done(result: ApiResult<()>, success: &str, failed: &str) -> ApiResponse<()> {
    match result {
        Ok(()) => ApiResponse::empty().with_message(success),
        Err(e) => reject(e, failed),
    }
}

fn reject<T>(error: ApiError, failed: &str) -> ApiResponse<T> {
    if error.is_store() {
        error!(%error, "{failed}");
        ApiResponse::failure(failed)
    } else {
        warn!(%error, "Request rejected");
        ApiResponse::failure(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CartItem;
    use crate::testing::test_shop;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_rejections_use_error_messages() {
        let shop = test_shop().await;

        let cart = shop.get_cart("nobody").await;
        assert!(!cart.success);
        assert_eq!(cart.error.as_deref(), Some("Authentication required"));

        let login = shop.login("user@test.com", "nope").await;
        assert_eq!(login.error.as_deref(), Some("Invalid credentials"));
        assert!(login.data.is_none());
    }

    #[tokio::test]
    async fn test_update_to_zero_reports_removal() {
        let shop = test_shop().await;
        let token = shop.login("user@test.com", "user123").await.data.unwrap().token;

        shop.add_to_cart(&token, "1", 1).await;
        let removed = shop.update_cart_item(&token, "1", -3).await;
        assert!(removed.success);
        assert_eq!(removed.message.as_deref(), Some("Item removed from cart"));
    }

    #[tokio::test]
    async fn test_reset_restores_seed() {
        let shop = test_shop().await;
        let admin = shop.login("admin@test.com", "admin123").await.data.unwrap().token;

        shop.delete_product(&admin, "1").await;
        shop.add_to_cart(&admin, "2", 1).await;
        shop.create_order(&admin).await;
        shop.add_to_cart(&admin, "3", 1).await;

        let reset = shop.reset_data().await;
        assert_eq!(reset.message.as_deref(), Some("Data reset successfully"));

        assert!(shop.get_product("1").await.success);
        assert_eq!(shop.get_product("2").await.data.unwrap().stock, 25);
        assert_eq!(
            shop.get_cart(&admin).await.error.as_deref(),
            Some("Authentication required")
        );
        assert!(shop.state.keys_with_prefix(CART_PREFIX).await.unwrap().is_empty());
        assert!(shop.state.orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reset_waits_for_cart_writers() {
        let shop = test_shop().await;

        let writer = shop.state.lock(&cart_key("2")).await;
        let reset = shop.reset();
        tokio::pin!(reset);
        assert!(tokio::time::timeout(Duration::from_millis(50), &mut reset)
            .await
            .is_err());

        // A cart write that was already under way lands before the reset.
        let line = CartItem {
            product_id: "1".into(),
            quantity: 1,
            price: Decimal::new(9999, 2),
        };
        shop.state.save_cart("2", &[line]).await.unwrap();
        drop(writer);

        reset.await.unwrap();
        assert!(shop.state.cart("2").await.unwrap().is_empty());
        assert!(shop.state.keys_with_prefix(CART_PREFIX).await.unwrap().is_empty());
    }
}
