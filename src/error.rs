//! # Errors
//!
//! [`ApiError`] is the error taxonomy of every storefront operation. Its
//! `Display` text is exactly the message placed in a failed response envelope,
//! except for [`ApiError::Store`], which the facade replaces with an
//! operation-specific "Failed to ..." message.

use crate::pricing::AmountOverflow;
use crate::store::StoreError;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Session expired")]
    SessionExpired,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Product not found")]
    ProductNotFound(String),

    #[error("Order not found")]
    OrderNotFound(String),

    #[error("User not found")]
    UserNotFound(String),

    #[error("Item not found in cart")]
    ItemNotFound(String),

    /// `product` is set by order placement to name the item that ran short.
    #[error("Insufficient stock{}", for_product(.product))]
    InsufficientStock { product: Option<String> },

    #[error("Cart is empty")]
    CartEmpty,

    #[error("Access denied")]
    AccessDenied,

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("{0}")]
    InvalidProduct(String),

    /// A cart, order or revenue amount left the representable range.
    #[error(transparent)]
    Amount(#[from] AmountOverflow),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn for_product(product: &Option<String>) -> String {
    match product {
        Some(name) => format!(" for {name}"),
        None => String::new(),
    }
}

impl ApiError {
    /// Store failures are infrastructure problems rather than rejected requests.
    pub fn is_store(&self) -> bool {
        matches!(self, ApiError::Store(_))
    }
}
