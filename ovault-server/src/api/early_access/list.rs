use axum::{Json, extract::Query, response::IntoResponse};
use kanau::processor::Processor;
use ovault_core::entities::early_access::{CountEarlyAccessSubmissions, ListEarlyAccessSubmissions};
use ovault_core::framework::DatabaseProcessor;
use ovault_sdk::objects::{PagedEnvelope, Pagination};
use ovault_sdk::objects::early_access::{ListSubmissionsQuery, clamp_pagination};

use super::{EarlyAccessApiError, submission_to_response};
use crate::state::AppState;

/// `GET /` — list submissions newest-first with pagination and an
/// optional `formType` filter.
pub(super) async fn list(
    state: axum::extract::State<AppState>,
    Query(query): Query<ListSubmissionsQuery>,
) -> Result<impl IntoResponse, EarlyAccessApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let (page, limit, offset) = clamp_pagination(query.page, query.limit);
    let form_type = query.form_type.map(Into::into);

    let records = processor
        .process(ListEarlyAccessSubmissions {
            limit,
            offset,
            form_type,
        })
        .await
        .map_err(EarlyAccessApiError::Database)?;

    let total = processor
        .process(CountEarlyAccessSubmissions { form_type })
        .await
        .map_err(EarlyAccessApiError::Database)?;

    let data: Vec<_> = records.iter().map(submission_to_response).collect();
    Ok(Json(PagedEnvelope::ok(data, Pagination::new(page, limit, total))))
}
