//! Early-access API handlers.
//!
//! Public endpoints capture and expose signup submissions; the
//! per-submission endpoints require the `Ovault-Admin-Authorization`
//! header.
//!
//! # Endpoints
//!
//! - `POST   /`           – submit a new early-access form
//! - `GET    /`           – list submissions (paginated, filterable)
//! - `GET    /stats`      – aggregate counters
//! - `POST   /submit`     – 307 redirect to `POST /` (legacy form action)
//! - `GET    /{id}`       – fetch one submission (admin)
//! - `PUT    /{id}`       – update a submission (admin)
//! - `DELETE /{id}`       – delete a submission (admin)

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};

use crate::state::AppState;
use ovault_core::entities::early_access::EarlyAccessSubmission;
use ovault_sdk::objects::ErrorBody;
use ovault_sdk::objects::early_access::SubmissionResponse;

mod admin;
mod list;
mod stats;
mod submit;

/// Build the early-access API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit::submit).get(list::list))
        .route("/stats", get(stats::stats))
        .route("/submit", post(redirect_to_root))
        .route(
            "/{id}",
            get(admin::get_submission)
                .put(admin::update_submission)
                .delete(admin::delete_submission),
        )
}

/// `POST /submit` — legacy form action kept for old clients; replays
/// the request against `POST /api/early-access` with the method and
/// body preserved (307).
async fn redirect_to_root() -> Redirect {
    Redirect::temporary("/api/early-access")
}

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

/// Errors that can occur in early-access API handlers.
#[derive(Debug)]
pub(crate) enum EarlyAccessApiError {
    /// A required field is missing or empty.
    Validation(&'static str),
    /// A database query failed.
    Database(sqlx::Error),
    /// The requested submission was not found.
    NotFound,
}

impl IntoResponse for EarlyAccessApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            EarlyAccessApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
            }
            EarlyAccessApiError::Database(e) => {
                tracing::error!(error = %e, "Early-access API database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("internal server error")),
                )
                    .into_response()
            }
            EarlyAccessApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody::new("submission not found")),
            )
                .into_response(),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub(crate) fn submission_to_response(record: &EarlyAccessSubmission) -> SubmissionResponse {
    SubmissionResponse {
        id: record.id,
        email: record.email.clone(),
        full_name: record.full_name.clone(),
        phone: record.phone.clone(),
        company: record.company.clone(),
        form_type: record.form_type.into(),
        initial_deposit: record.initial_deposit,
        monthly_contribution: record.monthly_contribution,
        target_apy: record.target_apy,
        calculations: record.calculations.clone(),
        created_at: record.created_at.assume_utc().unix_timestamp(),
    }
}
