use axum::{Json, response::IntoResponse};
use kanau::processor::Processor;
use ovault_core::entities::early_access::GetEarlyAccessStats;
use ovault_core::framework::DatabaseProcessor;
use ovault_sdk::objects::Envelope;
use ovault_sdk::objects::early_access::SubmissionStats;

use super::EarlyAccessApiError;
use crate::state::AppState;

/// `GET /stats` — aggregate submission counters.
pub(super) async fn stats(
    state: axum::extract::State<AppState>,
) -> Result<impl IntoResponse, EarlyAccessApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let stats = processor
        .process(GetEarlyAccessStats)
        .await
        .map_err(EarlyAccessApiError::Database)?;

    Ok(Json(Envelope::ok(SubmissionStats {
        total: stats.total,
        savings: stats.savings_count,
        investment: stats.investment_count,
        recent: stats.recent_count,
        projected_initial_deposits: stats.projected_initial_deposits,
        projected_monthly_contributions: stats.projected_monthly_contributions,
    })))
}
