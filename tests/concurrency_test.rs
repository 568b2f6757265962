use storefront_sim::{ShopConfig, ShopSystem, Storefront};

async fn token(shop: &Storefront, email: &str, password: &str) -> String {
    shop.login(email, password).await.data.unwrap().token
}

/// Two users each hold 5 of the 8 keyboards in their carts and check out at
/// the same time. Exactly one order may win.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_orders_never_oversell() {
    let system = ShopSystem::start(ShopConfig::default()).await.unwrap();

    for round in 0..10 {
        let shop = system.storefront.clone();
        assert!(shop.reset_data().await.success);

        let admin = token(&shop, "admin@test.com", "admin123").await;
        let customer = token(&shop, "user@test.com", "user123").await;
        assert!(shop.add_to_cart(&admin, "4", 5).await.success);
        assert!(shop.add_to_cart(&customer, "4", 5).await.success);

        let racers: Vec<_> = [admin, customer]
            .into_iter()
            .map(|token| {
                let shop = shop.clone();
                tokio::spawn(async move { shop.create_order(&token).await })
            })
            .collect();

        let mut placed = 0;
        let mut refused = Vec::new();
        for racer in racers {
            let response = racer.await.unwrap();
            if response.success {
                placed += 1;
            } else {
                refused.push(response.error.unwrap());
            }
        }

        assert_eq!(placed, 1, "round {round}");
        assert_eq!(
            refused,
            vec!["Insufficient stock for Mechanical Gaming Keyboard".to_string()]
        );
        assert_eq!(shop.get_product("4").await.data.unwrap().stock, 3);
    }

    system.shutdown().await.unwrap();
}

/// Many concurrent adds to one cart must not lose updates.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_to_one_cart() {
    let system = ShopSystem::start(ShopConfig::default()).await.unwrap();
    let customer = token(&system.storefront, "user@test.com", "user123").await;

    let adds: Vec<_> = (0..20)
        .map(|_| {
            let shop = system.storefront.clone();
            let customer = customer.clone();
            tokio::spawn(async move { shop.add_to_cart(&customer, "3", 1).await.success })
        })
        .collect();
    for add in adds {
        assert!(add.await.unwrap());
    }

    let cart = system.storefront.get_cart(&customer).await.data.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 20);

    system.shutdown().await.unwrap();
}
