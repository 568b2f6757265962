use anyhow::{bail, Context};
use storefront_sim::catalog::ProductFilter;
use storefront_sim::lifecycle::setup_tracing;
use storefront_sim::model::OrderStatus;
use storefront_sim::{ShopConfig, ShopSystem};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = ShopConfig::from_env()?;
    info!(?config, "Starting storefront demo");

    let system = ShopSystem::start(config)
        .await
        .context("failed to start shop system")?;
    let shop = &system.storefront;

    let login = shop.login("user@test.com", "user123").await;
    let Some(customer) = login.data else {
        bail!("customer login failed: {:?}", login.error);
    };
    info!(user = %customer.user.name, "Customer signed in");
    let token = customer.token;

    let span = tracing::info_span!("browsing");
    let electronics = async {
        let filter = ProductFilter::default().category("Electronics");
        shop.list_products(&filter).await
    }
    .instrument(span)
    .await;
    for product in electronics.data.unwrap_or_default() {
        info!(
            id = %product.id,
            name = %product.name,
            price = %product.price,
            stock = product.stock,
            "Listed"
        );
    }

    let span = tracing::info_span!("checkout");
    let order = async {
        for (product_id, quantity) in [("1", 2), ("6", 1)] {
            let added = shop.add_to_cart(&token, product_id, quantity).await;
            info!(product_id, quantity, message = ?added.message, "Add to cart");
        }
        if let Some(cart) = shop.get_cart(&token).await.data {
            info!(lines = cart.items.len(), total = %cart.totals.total, "Cart ready");
        }
        shop.create_order(&token).await
    }
    .instrument(span)
    .await;

    let Some(order) = order.data else {
        bail!("order placement failed: {:?}", order.error);
    };
    info!(order_id = %order.id, total = %order.total, "Order placed");

    let denied = shop.get_stats(&token).await;
    warn!(error = ?denied.error, "Customer asked for stats");

    let span = tracing::info_span!("admin");
    async {
        let Some(admin) = shop.login("admin@test.com", "admin123").await.data else {
            return;
        };
        shop.update_order_status(&admin.token, &order.id, OrderStatus::Processing)
            .await;
        if let Some(stats) = shop.get_stats(&admin.token).await.data {
            info!(
                revenue = %stats.total_revenue,
                orders = stats.total_orders,
                low_stock = stats.low_stock_products,
                "Stats"
            );
        }
        shop.logout(&admin.token).await;
    }
    .instrument(span)
    .await;

    shop.logout(&token).await;
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
