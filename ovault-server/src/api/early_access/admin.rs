//! Admin-only submission management.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use kanau::processor::Processor;
use ovault_core::entities::early_access::{
    DeleteEarlyAccessSubmission, GetEarlyAccessSubmissionById, UpdateEarlyAccessSubmission,
};
use ovault_core::framework::DatabaseProcessor;
use ovault_sdk::objects::Envelope;
use ovault_sdk::objects::early_access::UpdateSubmissionRequest;
use uuid::Uuid;

use super::{EarlyAccessApiError, submission_to_response};
use crate::api::extractors::AdminAuth;
use crate::state::AppState;

/// `GET /{id}` — fetch a single submission.
pub(super) async fn get_submission(
    state: State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, EarlyAccessApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let record = processor
        .process(GetEarlyAccessSubmissionById { id })
        .await
        .map_err(EarlyAccessApiError::Database)?
        .ok_or(EarlyAccessApiError::NotFound)?;

    Ok(Json(Envelope::ok(submission_to_response(&record))))
}

/// `PUT /{id}` — partially update a submission. Absent body fields are
/// left unchanged.
pub(super) async fn update_submission(
    state: State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSubmissionRequest>,
) -> Result<impl IntoResponse, EarlyAccessApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let record = processor
        .process(UpdateEarlyAccessSubmission {
            id,
            email: body.email,
            full_name: body.full_name,
            phone: body.phone,
            company: body.company,
            form_type: body.form_type.map(Into::into),
            initial_deposit: body.initial_deposit,
            monthly_contribution: body.monthly_contribution,
            target_apy: body.target_apy,
        })
        .await
        .map_err(EarlyAccessApiError::Database)?
        .ok_or(EarlyAccessApiError::NotFound)?;

    tracing::info!(%id, "Admin updated early-access submission");
    Ok(Json(Envelope::ok(submission_to_response(&record))))
}

/// `DELETE /{id}` — remove a submission.
pub(super) async fn delete_submission(
    state: State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, EarlyAccessApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let deleted = processor
        .process(DeleteEarlyAccessSubmission { id })
        .await
        .map_err(EarlyAccessApiError::Database)?;

    if !deleted {
        return Err(EarlyAccessApiError::NotFound);
    }

    tracing::info!(%id, "Admin deleted early-access submission");
    Ok(Json(Envelope::ok(serde_json::json!({ "deleted": true }))))
}
