//! Custom Axum extractors for request authentication.
//!
//! Provides `AdminAuth`, which verifies the `Ovault-Admin-Authorization`
//! header against the argon2-hashed admin secret from the runtime
//! config.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use ovault_sdk::ADMIN_AUTH_HEADER;
use ovault_sdk::objects::ErrorBody;

use crate::state::AppState;

/// An Axum extractor that authenticates admin-only endpoints.
///
/// # Header format
///
/// ```text
/// Ovault-Admin-Authorization: {plaintext_admin_secret}
/// ```
pub struct AdminAuth;

/// Errors returned by the [`AdminAuth`] extractor.
#[derive(Debug)]
pub enum AdminAuthError {
    MissingHeader,
    InvalidHeader,
    Unauthorized,
}

impl IntoResponse for AdminAuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AdminAuthError::MissingHeader => (
                StatusCode::UNAUTHORIZED,
                "missing Ovault-Admin-Authorization header",
            ),
            AdminAuthError::InvalidHeader => (StatusCode::BAD_REQUEST, "invalid header format"),
            AdminAuthError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "admin authentication failed")
            }
        };
        (status, axum::Json(ErrorBody::new(message))).into_response()
    }
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AdminAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let secret = parts
            .headers
            .get(ADMIN_AUTH_HEADER)
            .ok_or(AdminAuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AdminAuthError::InvalidHeader)?;

        let admin = state.config.admin.read().await;
        if !admin.verify_secret(secret) {
            return Err(AdminAuthError::Unauthorized);
        }
        drop(admin);

        Ok(AdminAuth)
    }
}
