//! API request and response bodies.
//!
//! Everything here serializes with camelCase field names to match the
//! JSON contract the web frontend consumes.

pub mod early_access;
pub mod events;

use serde::{Deserialize, Serialize};

/// Standard success envelope wrapping a single payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wrap a payload in a success envelope without a message.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Wrap a payload in a success envelope with a human-readable message.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Standard error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Pagination summary included in list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Build a pagination summary from a (page, limit) pair and a total
    /// row count. `limit` is clamped to at least 1, and `total_pages` is
    /// never zero so clients can always render "page 1 of 1".
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = limit.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            (total + limit - 1) / limit
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// Paginated success envelope for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedEnvelope<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PagedEnvelope<T> {
    pub fn ok(data: Vec<T>, pagination: Pagination) -> Self {
        Self {
            success: true,
            data,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_total_pages() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(2, 10, 95).total_pages, 10);
    }

    #[test]
    fn test_pagination_clamps_zero_limit() {
        let pagination = Pagination::new(1, 0, 5);
        assert_eq!(pagination.limit, 1);
        assert_eq!(pagination.total_pages, 5);
    }

    #[test]
    fn test_envelope_serialization_omits_empty_message() {
        let json = serde_json::to_string(&Envelope::ok(42)).unwrap();
        assert_eq!(json, r#"{"success":true,"data":42}"#);

        let json = serde_json::to_string(&Envelope::ok_with_message(42, "created")).unwrap();
        assert!(json.contains(r#""message":"created""#));
    }
}
