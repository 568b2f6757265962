//! # Pricing
//!
//! The single totals formula shared by carts and orders.
//!
//! - subtotal = sum of unit price x quantity
//! - tax = 8% of subtotal
//! - shipping = free above 50, otherwise a flat 9.99
//! - total = subtotal + tax + shipping
//!
//! All arithmetic is exact [`Decimal`] arithmetic. Nothing is rounded here;
//! presentation decides how many places to show. Every step is checked, so an
//! amount beyond what a `Decimal` can hold is an [`AmountOverflow`] error.

use crate::model::CartItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 8%
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);
/// Orders with a subtotal strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// 9.99
pub const FLAT_SHIPPING: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Amount too large")]
pub struct AmountOverflow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Computes the totals for a list of items.
///
/// ```rust
/// use rust_decimal::Decimal;
/// use storefront_sim::model::CartItem;
/// use storefront_sim::pricing::compute_totals;
///
/// let items = vec![CartItem {
///     product_id: "2".into(),
///     quantity: 1,
///     price: Decimal::new(2999, 2),
/// }];
/// let totals = compute_totals(&items).unwrap();
/// assert_eq!(totals.shipping, Decimal::new(999, 2));
/// assert_eq!(totals.total, Decimal::new(423792, 4));
/// ```
pub fn compute_totals(items: &[CartItem]) -> Result<Totals, AmountOverflow> {
    let subtotal = checked_sum(items.iter().map(CartItem::line_total))?;
    let tax = subtotal.checked_mul(TAX_RATE).ok_or(AmountOverflow)?;
    let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING
    };
    let total = subtotal
        .checked_add(tax)
        .and_then(|t| t.checked_add(shipping))
        .ok_or(AmountOverflow)?;

    Ok(Totals {
        subtotal,
        tax,
        shipping,
        total,
    })
}

/// Sums amounts, failing on the first overflow.
pub fn checked_sum<I>(amounts: I) -> Result<Decimal, AmountOverflow>
where
    I: IntoIterator<Item = Result<Decimal, AmountOverflow>>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |sum, amount| {
        sum.checked_add(amount?).ok_or(AmountOverflow)
    })
}
