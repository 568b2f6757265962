use serde_json::{json, Value};
use std::sync::Arc;
use storefront_sim::seed;
use storefront_sim::store::mock::MockStore;
use storefront_sim::store::StoreError;
use storefront_sim::{ShopConfig, Storefront};

/// Facade over a scripted store. No seeding, so every store request the
/// operation makes must be expected explicitly.
fn shop_over(mock: &MockStore) -> Storefront {
    Storefront::new(Arc::new(mock.client()), &ShopConfig::default())
}

fn customer_session() -> Value {
    json!({
        "userId": "2",
        "email": "user@test.com",
        "role": "customer",
        "expiresAt": "2999-01-01T00:00:00Z"
    })
}

fn backend_down() -> StoreError {
    StoreError::Backend("connection reset".into())
}

#[tokio::test]
async fn test_failed_read_becomes_envelope() {
    let mut mock = MockStore::new();
    mock.expect_get("api_products").return_err(backend_down());

    let response = shop_over(&mock).get_product("1").await;

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Failed to fetch product"));
    mock.verify();
}

#[tokio::test]
async fn test_malformed_catalog_becomes_envelope() {
    let mut mock = MockStore::new();
    mock.expect_get("api_products")
        .return_ok(Some(json!("not a product list")));

    let response = shop_over(&mock).list_products(&Default::default()).await;

    assert_eq!(response.error.as_deref(), Some("Failed to fetch products"));
    assert!(response.pagination.is_none());
    mock.verify();
}

#[tokio::test]
async fn test_login_fails_when_session_cannot_be_saved() {
    let mut mock = MockStore::new();
    mock.expect_get("api_users")
        .return_ok(Some(serde_json::to_value(seed::test_users()).unwrap()));
    mock.expect_set("api_session_mock_jwt_2_")
        .return_err(backend_down());

    let response = shop_over(&mock).login("user@test.com", "user123").await;

    assert_eq!(response.error.as_deref(), Some("Login failed"));
    assert!(response.data.is_none());
    mock.verify();
}

#[tokio::test]
async fn test_failed_commit_fails_order() {
    let mut mock = MockStore::new();
    mock.expect_get("api_session_t1")
        .return_ok(Some(customer_session()));
    mock.expect_get("api_cart_2").return_ok(Some(json!([
        { "productId": "1", "quantity": 2, "price": "99.99" }
    ])));
    mock.expect_get("api_products")
        .return_ok(Some(serde_json::to_value(seed::sample_products()).unwrap()));
    mock.expect_get("api_orders").return_ok(Some(json!([])));
    mock.expect_commit().return_err(backend_down());

    let response = shop_over(&mock).create_order("t1").await;

    assert_eq!(response.error.as_deref(), Some("Failed to create order"));
    mock.verify();
}

#[tokio::test]
async fn test_rejection_is_not_a_store_failure() {
    let mut mock = MockStore::new();
    mock.expect_get("api_session_t1")
        .return_ok(Some(customer_session()));
    mock.expect_get("api_cart_2").return_ok(None);

    let response = shop_over(&mock).create_order("t1").await;

    assert_eq!(response.error.as_deref(), Some("Cart is empty"));
    mock.verify();
}

#[tokio::test]
async fn test_session_lookup_failure() {
    let mut mock = MockStore::new();
    mock.expect_get("api_session_").return_err(StoreError::ActorClosed);

    let response = shop_over(&mock).get_stats("t1").await;

    assert_eq!(response.error.as_deref(), Some("Failed to fetch stats"));
    mock.verify();
}
