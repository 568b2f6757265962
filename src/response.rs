//! # Response Envelope
//!
//! Every storefront operation answers with an [`ApiResponse`]:
//!
//! ```json
//! { "success": true, "data": { ... }, "message": "Item added to cart" }
//! { "success": false, "error": "Insufficient stock" }
//! { "success": true, "data": [ ... ], "pagination": { "page": 1, "limit": 20, "total": 15 } }
//! ```
//!
//! Absent optionals are omitted from the JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            pagination: None,
        }
    }

    /// Success without a payload.
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: None,
            pagination: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
            pagination: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// The payload of a successful response.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_are_omitted() {
        let ok = ApiResponse::ok(3).with_message("Cart updated");
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "success": true, "data": 3, "message": "Cart updated" })
        );

        let failed: ApiResponse<()> = ApiResponse::failure("Cart is empty");
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "success": false, "error": "Cart is empty" })
        );
    }
}
