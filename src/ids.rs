//! Generators for tokens and record identifiers.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// `len` random ASCII letters and digits.
pub fn random_suffix(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Opaque login token: `mock_jwt_<userId>_<millis>_<9 chars>`.
pub fn session_token(user_id: &str) -> String {
    format!(
        "mock_jwt_{}_{}_{}",
        user_id,
        Utc::now().timestamp_millis(),
        random_suffix(9)
    )
}

/// Fresh product id: `<millis>_<9 chars>`.
pub fn product_id() -> String {
    format!("{}_{}", Utc::now().timestamp_millis(), random_suffix(9))
}

/// Fresh order id: `ORD-<millis>-<4 uppercase chars>`.
pub fn order_id() -> String {
    format!(
        "ORD-{}-{}",
        Utc::now().timestamp_millis(),
        random_suffix(4).to_ascii_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_shape() {
        let id = order_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_token_names_its_user() {
        let token = session_token("2");
        assert!(token.starts_with("mock_jwt_2_"));
        assert_eq!(token.rsplit('_').next().map(str::len), Some(9));
        assert_ne!(token, session_token("2"));
    }
}
