//! # Cart Service
//!
//! Per-user carts stored under `api_cart_<userId>`. Every mutation holds the
//! caller's cart lock for its whole read-modify-write and is stock-checked
//! against the [`Catalog`] before anything is written.

use crate::catalog::Catalog;
use crate::error::{ApiError, ApiResult};
use crate::model::{CartItem, CartView};
use crate::session::SessionManager;
use crate::state::{cart_key, ShopState};
use tracing::{debug, instrument};

/// What [`CartService::update_cart_item`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Updated,
    Removed,
}

#[derive(Clone)]
pub struct CartService {
    state: ShopState,
    sessions: SessionManager,
    catalog: Catalog,
}

impl CartService {
    pub fn new(state: ShopState, sessions: SessionManager, catalog: Catalog) -> Self {
        Self {
            state,
            sessions,
            catalog,
        }
    }

    pub async fn get_cart(&self, token: &str) -> ApiResult<CartView> {
        let session = self.sessions.require_auth(token, false).await?;
        let items = self.state.cart(&session.user_id).await?;
        Ok(CartView::new(items)?)
    }

    /// Adds `quantity` of a product, merging with an existing line.
    ///
    /// A new line captures the product's current price. The combined quantity
    /// may not exceed the product's stock.
    #[instrument(skip(self, token))]
    pub async fn add_to_cart(&self, token: &str, product_id: &str, quantity: u32) -> ApiResult<()> {
        let session = self.sessions.require_auth(token, false).await?;
        if quantity == 0 {
            return Err(ApiError::InvalidQuantity);
        }

        let _guard = self.state.lock(&cart_key(&session.user_id)).await;
        let product = self.catalog.get_product(product_id).await?;
        let mut items = self.state.cart(&session.user_id).await?;

        match items.iter_mut().find(|item| item.product_id == product_id) {
            Some(item) => {
                let wanted = item.quantity.saturating_add(quantity);
                if wanted > product.stock {
                    return Err(ApiError::InsufficientStock { product: None });
                }
                item.quantity = wanted;
            }
            None => {
                if quantity > product.stock {
                    return Err(ApiError::InsufficientStock { product: None });
                }
                items.push(CartItem {
                    product_id: product.id,
                    quantity,
                    price: product.price,
                });
            }
        }

        self.state.save_cart(&session.user_id, &items).await?;
        debug!(user_id = %session.user_id, lines = items.len(), "Cart saved");
        Ok(())
    }

    /// Sets the quantity of a line already in the cart. Zero or less removes it.
    #[instrument(skip(self, token))]
    pub async fn update_cart_item(
        &self,
        token: &str,
        product_id: &str,
        quantity: i64,
    ) -> ApiResult<CartChange> {
        let session = self.sessions.require_auth(token, false).await?;
        if quantity <= 0 {
            self.remove_from_cart(token, product_id).await?;
            return Ok(CartChange::Removed);
        }

        let _guard = self.state.lock(&cart_key(&session.user_id)).await;
        let product = self.catalog.get_product(product_id).await?;
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q <= product.stock)
            .ok_or(ApiError::InsufficientStock { product: None })?;

        let mut items = self.state.cart(&session.user_id).await?;
        let item = items
            .iter_mut()
            .find(|item| item.product_id == product_id)
            .ok_or_else(|| ApiError::ItemNotFound(product_id.to_string()))?;
        item.quantity = quantity;

        self.state.save_cart(&session.user_id, &items).await?;
        Ok(CartChange::Updated)
    }

    /// Removes a line. Removing a product that is not in the cart succeeds.
    pub async fn remove_from_cart(&self, token: &str, product_id: &str) -> ApiResult<()> {
        let session = self.sessions.require_auth(token, false).await?;

        let _guard = self.state.lock(&cart_key(&session.user_id)).await;
        let mut items = self.state.cart(&session.user_id).await?;
        items.retain(|item| item.product_id != product_id);
        self.state.save_cart(&session.user_id, &items).await?;
        Ok(())
    }

    pub async fn clear_cart(&self, token: &str) -> ApiResult<()> {
        let session = self.sessions.require_auth(token, false).await?;

        let _guard = self.state.lock(&cart_key(&session.user_id)).await;
        self.state.save_cart(&session.user_id, &[]).await?;
        Ok(())
    }
}
