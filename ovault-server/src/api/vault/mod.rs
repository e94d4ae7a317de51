//! Vault event API handlers.
//!
//! Read-only projections of the on-chain vault contract's event log,
//! served from the injected indexer-backed aggregator. Indexer outages
//! never surface as HTTP errors here: the handlers log the failure and
//! return empty payloads so the frontend keeps rendering.

use axum::{Json, Router, extract::Query, routing::get};

use crate::state::AppState;
use ovault_core::chain::{EventFilter, format_event_for_display};
use ovault_sdk::objects::Envelope;
use ovault_sdk::objects::events::{
    RecentActivityResponse, VaultEventsQuery, VaultEventsResponse, VaultStatsResponse,
};

/// Per-category event count for the activity snapshot.
const ACTIVITY_LIMIT: u32 = 10;

/// Build the vault API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/activity", get(activity))
        .route("/stats", get(stats))
        .route("/events", get(events))
}

/// `GET /activity` — recent deposits, withdrawals and yield claims.
async fn activity(state: axum::extract::State<AppState>) -> Json<Envelope<RecentActivityResponse>> {
    let snapshot = state.vault.recent_activity(ACTIVITY_LIMIT).await;

    let response = RecentActivityResponse {
        total_events: snapshot.total_events(),
        deposits: snapshot.deposits.iter().map(format_event_for_display).collect(),
        withdrawals: snapshot
            .withdrawals
            .iter()
            .map(format_event_for_display)
            .collect(),
        yield_claims: snapshot
            .yield_claims
            .iter()
            .map(format_event_for_display)
            .collect(),
    };
    Json(Envelope::ok(response))
}

/// `GET /stats` — lifetime totals and the distinct depositor count.
async fn stats(state: axum::extract::State<AppState>) -> Json<Envelope<VaultStatsResponse>> {
    let stats = match state.vault.vault_statistics().await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!(error = %e, "Failed to compute vault statistics");
            Default::default()
        }
    };

    Json(Envelope::ok(VaultStatsResponse {
        total_deposits: stats.total_deposits,
        total_withdrawals: stats.total_withdrawals,
        total_yield_paid: stats.total_yield_paid,
        active_users: stats.active_users.len() as u64,
    }))
}

/// `GET /events` — raw event listing with optional `type` and `user`
/// filters.
async fn events(
    state: axum::extract::State<AppState>,
    Query(query): Query<VaultEventsQuery>,
) -> Json<Envelope<VaultEventsResponse>> {
    let limit = query.limit.unwrap_or(ovault_core::chain::DEFAULT_FETCH_LIMIT);

    let result = match query.user {
        Some(user) => state
            .vault
            .user_events(&user)
            .await
            .map(|mut events| {
                if let Some(name) = &query.event_type {
                    events.retain(|event| event.event_name == *name);
                }
                let has_more = events.len() > limit as usize;
                events.truncate(limit as usize);
                (events, has_more)
            }),
        None => state
            .vault
            .events(EventFilter {
                event_name: query.event_type,
                limit,
                ..EventFilter::default()
            })
            .await
            .map(|batch| (batch.events, batch.has_more)),
    };

    let (events, has_more) = match result {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch vault events");
            (Vec::new(), false)
        }
    };

    Json(Envelope::ok(VaultEventsResponse {
        events: events.iter().map(format_event_for_display).collect(),
        has_more,
    }))
}
