use crate::pricing::{AmountOverflow, Totals};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a cart or order. `price` is the unit price captured when the
/// product was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl CartItem {
    pub fn line_total(&self) -> Result<Decimal, AmountOverflow> {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(AmountOverflow)
    }
}

/// A cart as returned to callers: its items plus computed totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub totals: Totals,
}

impl CartView {
    pub fn new(items: Vec<CartItem>) -> Result<Self, AmountOverflow> {
        let totals = crate::pricing::compute_totals(&items)?;
        Ok(Self { items, totals })
    }
}
