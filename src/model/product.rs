use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog entry.
///
/// Products are never removed from the stored list. Deleting one sets
/// `deleted`, which hides it from listings and lookups while past orders keep
/// referring to its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub category: String,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

impl Product {
    /// Whether the product is visible to shoppers.
    pub fn is_listed(&self) -> bool {
        !self.deleted
    }
}

/// Payload for creating a product. The id is assigned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub category: String,
    pub stock: u32,
}

impl ProductCreate {
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            image: self.image,
            category: self.category,
            stock: self.stock,
            deleted: false,
        }
    }
}

/// Partial update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub stock: Option<u32>,
}

impl ProductUpdate {
    /// Shallow merge into `product`. The id is never touched.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard() -> Product {
        Product {
            id: "4".into(),
            name: "Mechanical Gaming Keyboard".into(),
            price: Decimal::new(12999, 2),
            description: String::new(),
            image: String::new(),
            category: "Electronics".into(),
            stock: 8,
            deleted: false,
        }
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let mut product = keyboard();
        ProductUpdate {
            price: Some(Decimal::new(11999, 2)),
            stock: Some(3),
            ..Default::default()
        }
        .apply(&mut product);

        assert_eq!(product.id, "4");
        assert_eq!(product.name, "Mechanical Gaming Keyboard");
        assert_eq!(product.price, Decimal::new(11999, 2));
        assert_eq!(product.stock, 3);
    }

    #[test]
    fn test_deleted_flag_is_omitted_until_set() {
        let mut product = keyboard();
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("deleted").is_none());
        assert_eq!(json["price"], "129.99");

        product.deleted = true;
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["deleted"], true);
        assert!(!serde_json::from_value::<Product>(json).unwrap().is_listed());
    }
}
