//! # Admin Reporting
//!
//! Read-only summaries over the catalog, orders and users. Every call
//! requires an admin session.

use crate::error::ApiResult;
use crate::model::{Order, User};
use crate::pricing;
use crate::session::SessionManager;
use crate::state::ShopState;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How many orders [`Stats::recent_orders`] holds.
pub const RECENT_ORDERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Sum of `total` over every order, whatever its status.
    pub total_revenue: Decimal,
    /// Listed products only.
    pub total_products: usize,
    pub total_orders: usize,
    pub total_users: usize,
    pub low_stock_products: usize,
    /// Newest first.
    pub recent_orders: Vec<Order>,
}

#[derive(Clone)]
pub struct AdminReports {
    state: ShopState,
    sessions: SessionManager,
    low_stock_threshold: u32,
}

impl AdminReports {
    pub fn new(state: ShopState, sessions: SessionManager, low_stock_threshold: u32) -> Self {
        Self {
            state,
            sessions,
            low_stock_threshold,
        }
    }

    #[instrument(skip(self, token))]
    pub async fn stats(&self, token: &str) -> ApiResult<Stats> {
        self.sessions.require_auth(token, true).await?;

        let products = self.state.products().await?;
        let orders = self.state.orders().await?;
        let users = self.state.users().await?;

        let listed = products.iter().filter(|p| p.is_listed());
        let total_products = listed.clone().count();
        let low_stock_products = listed
            .filter(|p| p.stock < self.low_stock_threshold)
            .count();

        let total_revenue = pricing::checked_sum(orders.iter().map(|o| Ok(o.total)))?;

        Ok(Stats {
            total_revenue,
            total_products,
            total_orders: orders.len(),
            total_users: users.len(),
            low_stock_products,
            recent_orders: orders.iter().rev().take(RECENT_ORDERS).cloned().collect(),
        })
    }

    pub async fn all_orders(&self, token: &str) -> ApiResult<Vec<Order>> {
        self.sessions.require_auth(token, true).await?;
        Ok(self.state.orders().await?)
    }

    pub async fn all_users(&self, token: &str) -> ApiResult<Vec<User>> {
        self.sessions.require_auth(token, true).await?;
        Ok(self.state.users().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::model::OrderStatus;
    use crate::testing::{login_admin, login_customer, test_shop};
    use chrono::Utc;

    #[tokio::test]
    async fn test_stats_on_fresh_data() {
        let shop = test_shop().await;
        let admin = login_admin(&shop.sessions).await;

        let stats = shop.admin.stats(&admin).await.unwrap();
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert_eq!(stats.total_products, 15);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.low_stock_products, 0);
        assert!(stats.recent_orders.is_empty());
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first() {
        let shop = test_shop().await;
        let customer = login_customer(&shop.sessions).await;
        let admin = login_admin(&shop.sessions).await;

        let mut placed = Vec::new();
        for _ in 0..6 {
            shop.carts.add_to_cart(&customer, "6", 1).await.unwrap();
            placed.push(shop.orders.create_order(&customer).await.unwrap());
        }

        let stats = shop.admin.stats(&admin).await.unwrap();
        assert_eq!(stats.total_orders, 6);
        let recent: Vec<&str> = stats.recent_orders.iter().map(|o| o.id.as_str()).collect();
        let expected: Vec<&str> = placed.iter().rev().take(5).map(|o| o.id.as_str()).collect();
        assert_eq!(recent, expected);

        let revenue: Decimal = placed.iter().map(|o| o.total).sum();
        assert_eq!(stats.total_revenue, revenue);
        assert_eq!(shop.admin.all_orders(&admin).await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_low_stock_counts_below_threshold() {
        let shop = test_shop().await;
        let customer = login_customer(&shop.sessions).await;
        let admin = login_admin(&shop.sessions).await;

        shop.carts.add_to_cart(&customer, "4", 3).await.unwrap();
        shop.orders.create_order(&customer).await.unwrap();
        assert_eq!(shop.admin.stats(&admin).await.unwrap().low_stock_products, 0);

        shop.carts.add_to_cart(&customer, "4", 1).await.unwrap();
        shop.orders.create_order(&customer).await.unwrap();
        assert_eq!(shop.admin.stats(&admin).await.unwrap().low_stock_products, 1);
    }

    #[tokio::test]
    async fn test_reports_are_admin_only() {
        let shop = test_shop().await;
        let customer = login_customer(&shop.sessions).await;

        assert!(matches!(
            shop.admin.stats(&customer).await,
            Err(ApiError::AdminRequired)
        ));
        assert!(matches!(
            shop.admin.all_users(&customer).await,
            Err(ApiError::AdminRequired)
        ));
    }

    #[tokio::test]
    async fn test_revenue_overflow_is_an_error() {
        let shop = test_shop().await;
        let admin = login_admin(&shop.sessions).await;

        let order = |id: &str| Order {
            id: id.into(),
            user_id: "2".into(),
            items: Vec::new(),
            subtotal: Decimal::MAX,
            tax: Decimal::ZERO,
            shipping: Decimal::ZERO,
            total: Decimal::MAX,
            status: OrderStatus::Delivered,
            created_at: Utc::now(),
        };
        shop.admin
            .state
            .save_orders(&[order("ORD-1"), order("ORD-2")])
            .await
            .unwrap();

        assert!(matches!(
            shop.admin.stats(&admin).await,
            Err(ApiError::Amount(_))
        ));
    }
}
