//! # Seed Data
//!
//! The catalog, users and credentials installed on first start and by a data
//! reset.

use crate::model::{Product, Role, User};
use rust_decimal::Decimal;

/// Browsing categories. `All` is the no-filter sentinel.
pub const CATEGORIES: [&str; 7] = [
    ALL_CATEGORIES,
    "Electronics",
    "Clothing",
    "Home & Garden",
    "Sports & Fitness",
    "Food & Beverage",
    "Accessories",
];

pub const ALL_CATEGORIES: &str = "All";

const CREDENTIALS: [(&str, &str); 2] = [
    ("admin@test.com", "admin123"),
    ("user@test.com", "user123"),
];

/// Whether `password` is the fixed password for `email`.
pub fn credentials_match(email: &str, password: &str) -> bool {
    CREDENTIALS
        .iter()
        .any(|(known_email, known_password)| *known_email == email && *known_password == password)
}

pub fn test_users() -> Vec<User> {
    vec![
        User {
            id: "1".into(),
            email: "admin@test.com".into(),
            name: "Admin User".into(),
            role: Role::Admin,
        },
        User {
            id: "2".into(),
            email: "user@test.com".into(),
            name: "Test Customer".into(),
            role: Role::Customer,
        },
    ]
}

pub fn sample_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Wireless Bluetooth Headphones",
            9999,
            "Premium quality wireless headphones with noise cancellation and 30-hour battery life.",
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=400&h=400&fit=crop",
            "Electronics",
            15,
        ),
        product(
            "2",
            "Organic Cotton T-Shirt",
            2999,
            "Soft, breathable organic cotton t-shirt available in multiple colors.",
            "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400&h=400&fit=crop",
            "Clothing",
            25,
        ),
        product(
            "3",
            "Stainless Steel Water Bottle",
            2499,
            "Insulated stainless steel water bottle that keeps drinks cold for 24 hours.",
            "https://images.unsplash.com/photo-1602143407151-7111542de6e8?w=400&h=400&fit=crop",
            "Home & Garden",
            30,
        ),
        product(
            "4",
            "Mechanical Gaming Keyboard",
            12999,
            "RGB backlit mechanical keyboard with blue switches and programmable keys.",
            "https://images.unsplash.com/photo-1541140532154-b024d705b90a?w=400&h=400&fit=crop",
            "Electronics",
            8,
        ),
        product(
            "5",
            "Yoga Mat Premium",
            4999,
            "Non-slip yoga mat with extra cushioning and alignment lines.",
            "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?w=400&h=400&fit=crop",
            "Sports & Fitness",
            20,
        ),
        product(
            "6",
            "Coffee Beans - Dark Roast",
            1699,
            "Premium dark roast coffee beans sourced from sustainable farms.",
            "https://images.unsplash.com/photo-1559056199-641a0ac8b55e?w=400&h=400&fit=crop",
            "Food & Beverage",
            45,
        ),
        product(
            "7",
            "Leather Crossbody Bag",
            8999,
            "Genuine leather crossbody bag with adjustable strap and multiple compartments.",
            "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=400&h=400&fit=crop",
            "Accessories",
            12,
        ),
        product(
            "8",
            "Smart Fitness Watch",
            19999,
            "Advanced fitness tracking with heart rate monitor and GPS.",
            "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=400&h=400&fit=crop",
            "Electronics",
            18,
        ),
        product(
            "9",
            "Ceramic Plant Pot Set",
            3499,
            "Set of 3 ceramic plant pots with drainage holes and saucers.",
            "https://images.unsplash.com/photo-1485955900006-10f4d324d411?w=400&h=400&fit=crop",
            "Home & Garden",
            22,
        ),
        product(
            "10",
            "Wireless Phone Charger",
            3999,
            "Fast wireless charging pad compatible with all Qi-enabled devices.",
            "https://images.unsplash.com/photo-1583394838336-acd977736f90?w=400&h=400&fit=crop",
            "Electronics",
            35,
        ),
        product(
            "11",
            "Denim Jacket Classic",
            7999,
            "Timeless denim jacket with a comfortable fit and vintage wash.",
            "https://images.unsplash.com/photo-1551537482-f2075a1d41f2?w=400&h=400&fit=crop",
            "Clothing",
            16,
        ),
        product(
            "12",
            "Essential Oil Diffuser",
            5499,
            "Ultrasonic aromatherapy diffuser with color-changing LED lights.",
            "https://images.unsplash.com/photo-1544947950-fa07a98d237f?w=400&h=400&fit=crop",
            "Home & Garden",
            28,
        ),
        product(
            "13",
            "Protein Powder Vanilla",
            4499,
            "Whey protein powder with 25g protein per serving and natural vanilla flavor.",
            "https://images.unsplash.com/photo-1593095948071-474c5cc2989d?w=400&h=400&fit=crop",
            "Sports & Fitness",
            33,
        ),
        product(
            "14",
            "Artisan Tea Collection",
            3299,
            "Premium tea sampler with 12 different artisan blends.",
            "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?w=400&h=400&fit=crop",
            "Food & Beverage",
            19,
        ),
        product(
            "15",
            "Minimalist Watch",
            14999,
            "Elegant minimalist watch with leather strap and Swiss movement.",
            "https://images.unsplash.com/photo-1524805444758-089113d48a6d?w=400&h=400&fit=crop",
            "Accessories",
            11,
        ),
    ]
}

fn product(
    id: &str,
    name: &str,
    cents: i64,
    description: &str,
    image: &str,
    category: &str,
    stock: u32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        description: description.to_string(),
        image: image.to_string(),
        category: category.to_string(),
        stock,
        deleted: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let products = sample_products();
        assert_eq!(products.len(), 15);

        let keyboard = products.iter().find(|p| p.id == "4").unwrap();
        assert_eq!(keyboard.stock, 8);
        assert_eq!(keyboard.price, Decimal::new(12999, 2));

        for product in &products {
            assert!(CATEGORIES[1..].contains(&product.category.as_str()));
        }
    }

    #[test]
    fn test_credentials() {
        assert!(credentials_match("admin@test.com", "admin123"));
        assert!(credentials_match("user@test.com", "user123"));
        assert!(!credentials_match("user@test.com", "admin123"));
        assert!(!credentials_match("nobody@test.com", "user123"));
    }
}
