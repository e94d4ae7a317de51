//! Early-access API request and response types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which onboarding form produced a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    Savings,
    Investment,
}

/// Body of `POST /api/early-access`.
///
/// Only `email` and `full_name` are required server-side; the rest is an
/// optional financial profile captured by the signup calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyAccessRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub form_type: Option<FormType>,
    #[serde(default)]
    pub initial_deposit: Option<Decimal>,
    #[serde(default)]
    pub monthly_contribution: Option<Decimal>,
    #[serde(default)]
    pub target_apy: Option<Decimal>,
    /// Projection the signup calculator rendered for the user, kept
    /// verbatim so admins see what the lead was shown.
    #[serde(default)]
    pub calculations: Option<serde_json::Value>,
}

/// A stored submission as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub form_type: FormType,
    pub initial_deposit: Option<Decimal>,
    pub monthly_contribution: Option<Decimal>,
    pub target_apy: Option<Decimal>,
    pub calculations: Option<serde_json::Value>,
    /// Unix timestamp of submission.
    pub created_at: i64,
}

/// Body of `PUT /api/early-access/{id}` (admin only). Absent fields are
/// left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubmissionRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub form_type: Option<FormType>,
    pub initial_deposit: Option<Decimal>,
    pub monthly_contribution: Option<Decimal>,
    pub target_apy: Option<Decimal>,
}

/// Aggregate counters for `GET /api/early-access/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStats {
    pub total: i64,
    pub savings: i64,
    pub investment: i64,
    /// Submissions received in the last 7 days.
    pub recent: i64,
    /// Sum of declared initial deposits across all submissions, in USD.
    pub projected_initial_deposits: Decimal,
    /// Sum of declared monthly contributions, in USD.
    pub projected_monthly_contributions: Decimal,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;
const MAX_PAGE: i64 = 100_000;

/// Query parameters for `GET /api/early-access`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubmissionsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_type: Option<FormType>,
}

impl Default for ListSubmissionsQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            form_type: None,
        }
    }
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Clamp page and limit to safe bounds and derive the row offset.
///
/// Returns `(page, limit, offset)`.
pub fn clamp_pagination(page: i64, limit: i64) -> (i64, i64, i64) {
    let page = page.clamp(1, MAX_PAGE);
    let limit = limit.clamp(1, MAX_LIMIT);
    (page, limit, (page - 1) * limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_pagination() {
        assert_eq!(clamp_pagination(1, 20), (1, 20, 0));
        assert_eq!(clamp_pagination(2, 10), (2, 10, 10));
        assert_eq!(clamp_pagination(0, 0), (1, 1, 0));
        assert_eq!(clamp_pagination(-5, 500), (1, MAX_LIMIT, 0));
        assert_eq!(clamp_pagination(1_000_000, 20), (MAX_PAGE, 20, (MAX_PAGE - 1) * 20));
    }

    #[test]
    fn test_request_accepts_minimal_body() {
        let body: EarlyAccessRequest =
            serde_json::from_str(r#"{"email":"jane@x.com","fullName":"Jane Doe"}"#).unwrap();
        assert_eq!(body.email, "jane@x.com");
        assert_eq!(body.full_name, "Jane Doe");
        assert!(body.form_type.is_none());
        assert!(body.initial_deposit.is_none());
    }

    #[test]
    fn test_form_type_wire_names() {
        assert_eq!(serde_json::to_string(&FormType::Savings).unwrap(), r#""savings""#);
        assert_eq!(
            serde_json::from_str::<FormType>(r#""investment""#).unwrap(),
            FormType::Investment
        );
    }
}
