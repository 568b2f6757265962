//! # Catalog
//!
//! Read access to the product list for everyone, write access for admins.
//! The catalog is the source of truth for stock levels; carts and orders read
//! it but only order placement decrements it.
//!
//! Deleted products stay in the stored list with `deleted` set. They are
//! hidden from [`Catalog::list_products`] and [`Catalog::get_product`], and
//! cannot be added to a cart or ordered.

use crate::error::{ApiError, ApiResult};
use crate::ids;
use crate::model::{Product, ProductCreate, ProductUpdate};
use crate::response::Pagination;
use crate::seed::{self, ALL_CATEGORIES};
use crate::session::SessionManager;
use crate::state::{ShopState, PRODUCTS_KEY};
use rust_decimal::Decimal;
use tracing::{info, instrument};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;

/// Highest accepted unit price. Keeps line totals well inside `Decimal` range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Query for [`Catalog::list_products`]. Empty strings and zero page/limit
/// count as "not given".
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl ProductFilter {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn page(mut self, page: usize, limit: usize) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    fn matches(&self, product: &Product) -> bool {
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            if !product.name.to_lowercase().contains(&term)
                && !product.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        match self.category.as_deref() {
            Some(category) if !category.is_empty() && category != ALL_CATEGORIES => {
                product.category == category
            }
            _ => true,
        }
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

#[derive(Clone)]
pub struct Catalog {
    state: ShopState,
    sessions: SessionManager,
}

impl Catalog {
    pub fn new(state: ShopState, sessions: SessionManager) -> Self {
        Self { state, sessions }
    }

    /// Filters, then paginates. `total` is the filtered count before paging.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: &ProductFilter) -> ApiResult<ProductPage> {
        let filtered: Vec<Product> = self
            .state
            .products()
            .await?
            .into_iter()
            .filter(|p| p.is_listed() && filter.matches(p))
            .collect();

        let page = filter.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = filter.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT);
        let total = filtered.len();

        let products = filtered
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        Ok(ProductPage {
            products,
            pagination: Pagination { page, limit, total },
        })
    }

    pub async fn get_product(&self, id: &str) -> ApiResult<Product> {
        self.state
            .products()
            .await?
            .into_iter()
            .find(|p| p.id == id && p.is_listed())
            .ok_or_else(|| ApiError::ProductNotFound(id.to_string()))
    }

    pub fn categories(&self) -> Vec<String> {
        seed::CATEGORIES.iter().map(|c| c.to_string()).collect()
    }

    #[instrument(skip(self, token, data), fields(name = %data.name))]
    pub async fn create_product(&self, token: &str, data: ProductCreate) -> ApiResult<Product> {
        self.sessions.require_auth(token, true).await?;
        validate_name(&data.name)?;
        validate_price(data.price)?;

        let _guard = self.state.lock(PRODUCTS_KEY).await;
        let mut products = self.state.products().await?;
        let product = data.into_product(ids::product_id());
        products.push(product.clone());
        self.state.save_products(&products).await?;

        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self, token, update))]
    pub async fn update_product(
        &self,
        token: &str,
        id: &str,
        update: ProductUpdate,
    ) -> ApiResult<Product> {
        self.sessions.require_auth(token, true).await?;
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let _guard = self.state.lock(PRODUCTS_KEY).await;
        let mut products = self.state.products().await?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id && p.is_listed())
            .ok_or_else(|| ApiError::ProductNotFound(id.to_string()))?;
        update.apply(product);
        let updated = product.clone();
        self.state.save_products(&products).await?;

        info!("Product updated");
        Ok(updated)
    }

    #[instrument(skip(self, token))]
    pub async fn delete_product(&self, token: &str, id: &str) -> ApiResult<()> {
        self.sessions.require_auth(token, true).await?;

        let _guard = self.state.lock(PRODUCTS_KEY).await;
        let mut products = self.state.products().await?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id && p.is_listed())
            .ok_or_else(|| ApiError::ProductNotFound(id.to_string()))?;
        product.deleted = true;
        self.state.save_products(&products).await?;

        info!("Product deleted");
        Ok(())
    }
}

fn validate_name(name: &str) -> ApiResult<()> {
    if name.trim().is_empty() {
        return Err(ApiError::InvalidProduct("Product name is required".into()));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> ApiResult<()> {
    if price < Decimal::ZERO {
        return Err(ApiError::InvalidProduct("Price must not be negative".into()));
    }
    if price > MAX_PRICE {
        return Err(ApiError::InvalidProduct("Price is too large".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{login_admin, login_customer, test_catalog};

    fn lamp() -> ProductCreate {
        ProductCreate {
            name: "Desk Lamp".into(),
            price: Decimal::new(2450, 2),
            description: "Adjustable LED desk lamp".into(),
            image: String::new(),
            category: "Home & Garden".into(),
            stock: 4,
        }
    }

    #[tokio::test]
    async fn test_default_listing() {
        let (catalog, _) = test_catalog().await;
        let page = catalog.list_products(&ProductFilter::default()).await.unwrap();
        assert_eq!(page.products.len(), 15);
        assert_eq!(
            page.pagination,
            Pagination {
                page: 1,
                limit: 20,
                total: 15
            }
        );
    }

    #[tokio::test]
    async fn test_search_category_and_paging() {
        let (catalog, _) = test_catalog().await;

        let watches = catalog
            .list_products(&ProductFilter::default().search("WATCH"))
            .await
            .unwrap();
        let ids: Vec<&str> = watches.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["8", "15"]);

        let electronics = catalog
            .list_products(
                &ProductFilter::default()
                    .category("Electronics")
                    .page(2, 2),
            )
            .await
            .unwrap();
        assert_eq!(electronics.pagination.total, 4);
        let ids: Vec<&str> = electronics.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["8", "10"]);

        let all = catalog
            .list_products(&ProductFilter::default().category("All").page(0, 0))
            .await
            .unwrap();
        assert_eq!(all.pagination.page, 1);
        assert_eq!(all.pagination.limit, 20);
        assert_eq!(all.products.len(), 15);
    }

    #[tokio::test]
    async fn test_admin_writes() {
        let (catalog, sessions) = test_catalog().await;
        let admin = login_admin(&sessions).await;

        let created = catalog.create_product(&admin, lamp()).await.unwrap();
        assert_eq!(catalog.get_product(&created.id).await.unwrap().name, "Desk Lamp");

        let updated = catalog
            .update_product(
                &admin,
                &created.id,
                ProductUpdate {
                    stock: Some(10),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.stock, 10);
        assert_eq!(updated.price, Decimal::new(2450, 2));

        catalog.delete_product(&admin, &created.id).await.unwrap();
        assert!(matches!(
            catalog.get_product(&created.id).await,
            Err(ApiError::ProductNotFound(_))
        ));
        assert!(matches!(
            catalog.delete_product(&admin, &created.id).await,
            Err(ApiError::ProductNotFound(_))
        ));
        assert_eq!(
            catalog
                .list_products(&ProductFilter::default())
                .await
                .unwrap()
                .pagination
                .total,
            15
        );
    }

    #[tokio::test]
    async fn test_writes_are_admin_only() {
        let (catalog, sessions) = test_catalog().await;
        let customer = login_customer(&sessions).await;

        assert!(matches!(
            catalog.create_product(&customer, lamp()).await,
            Err(ApiError::AdminRequired)
        ));
        assert!(matches!(
            catalog.delete_product("no-such-token", "1").await,
            Err(ApiError::AuthenticationRequired)
        ));
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let (catalog, sessions) = test_catalog().await;
        let admin = login_admin(&sessions).await;

        let mut data = lamp();
        data.price = Decimal::new(-1, 2);
        assert!(matches!(
            catalog.create_product(&admin, data).await,
            Err(ApiError::InvalidProduct(_))
        ));

        let result = catalog
            .update_product(
                &admin,
                "1",
                ProductUpdate {
                    price: Some(Decimal::new(-500, 2)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ApiError::InvalidProduct(_))));
        assert_eq!(
            catalog.get_product("1").await.unwrap().price,
            Decimal::new(9999, 2)
        );
    }

    #[tokio::test]
    async fn test_price_ceiling() {
        let (catalog, sessions) = test_catalog().await;
        let admin = login_admin(&sessions).await;

        let mut data = lamp();
        data.price = Decimal::MAX;
        assert!(matches!(
            catalog.create_product(&admin, data).await,
            Err(ApiError::InvalidProduct(_))
        ));

        let mut data = lamp();
        data.price = MAX_PRICE;
        let created = catalog.create_product(&admin, data).await.unwrap();
        assert_eq!(created.price, MAX_PRICE);

        let result = catalog
            .update_product(
                &admin,
                &created.id,
                ProductUpdate {
                    price: Some(MAX_PRICE + Decimal::ONE),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ApiError::InvalidProduct(_))));
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let (catalog, sessions) = test_catalog().await;
        let admin = login_admin(&sessions).await;

        let mut data = lamp();
        data.name = "   ".into();
        let result = catalog.create_product(&admin, data).await;
        assert!(matches!(result, Err(ApiError::InvalidProduct(_))));
        assert_eq!(result.unwrap_err().to_string(), "Product name is required");

        let result = catalog
            .update_product(
                &admin,
                "1",
                ProductUpdate {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ApiError::InvalidProduct(_))));
        assert_eq!(
            catalog.get_product("1").await.unwrap().name,
            "Wireless Bluetooth Headphones"
        );
    }
}
