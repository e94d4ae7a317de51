//! Event aggregation over the vendor indexer.
//!
//! Folds the vault contract's event log into the projections the API
//! serves: filtered listings, per-user history, running totals, and the
//! recent-activity snapshot.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::chain::client::{EventBatch, EventQuery, EventSource, EventSourceError};
use crate::chain::events::{
    EVENT_DEPOSIT, EVENT_WITHDRAWAL, EVENT_YIELD_CLAIMED, RawContractEvent,
};

/// Default number of events returned when a caller does not ask for a
/// specific limit.
pub const DEFAULT_FETCH_LIMIT: u32 = 50;

/// Outer bound when scanning for a single user's events or folding
/// statistics: at most this many events per category are considered.
const SCAN_LIMIT: u32 = 1000;

/// Page size requested from the indexer per round trip.
const INDEXER_PAGE_SIZE: u32 = 100;

/// Filter for [`EventAggregator::events`].
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Event name; `None` selects all event types.
    pub event_name: Option<String>,
    pub from_block: Option<i64>,
    pub to_block: Option<i64>,
    /// Maximum events to return; 0 means [`DEFAULT_FETCH_LIMIT`].
    pub limit: u32,
}

impl EventFilter {
    /// Filter fixing an event name with a result limit.
    pub fn named(event_name: &str, limit: u32) -> Self {
        Self {
            event_name: Some(event_name.to_owned()),
            limit,
            ..Self::default()
        }
    }
}

/// Running totals folded from the event log.
///
/// All totals are in whole tokens (base units scaled by 1e-6) and are
/// non-negative by construction.
#[derive(Debug, Clone, Default)]
pub struct VaultStatistics {
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub total_yield_paid: Decimal,
    pub active_users: HashSet<String>,
}

/// Snapshot of recent vault activity across the three event categories.
#[derive(Debug, Clone, Default)]
pub struct RecentActivity {
    pub deposits: Vec<RawContractEvent>,
    pub withdrawals: Vec<RawContractEvent>,
    pub yield_claims: Vec<RawContractEvent>,
}

impl RecentActivity {
    pub fn total_events(&self) -> usize {
        self.deposits.len() + self.withdrawals.len() + self.yield_claims.len()
    }
}

/// Reads the vault's event log through an injected [`EventSource`] and
/// folds it into display-ready aggregates.
pub struct EventAggregator<S> {
    source: S,
}

impl<S: EventSource> EventAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch events matching the filter, paginating the indexer until
    /// the limit is reached or the indexer runs out of pages.
    ///
    /// `has_more` in the result is true when further matching events
    /// exist beyond the returned slice.
    pub async fn events(&self, filter: EventFilter) -> Result<EventBatch, EventSourceError> {
        let limit = if filter.limit == 0 {
            DEFAULT_FETCH_LIMIT
        } else {
            filter.limit
        };
        let page_size = limit.min(INDEXER_PAGE_SIZE);

        let mut events: Vec<RawContractEvent> = Vec::new();
        let mut page = 1u32;
        let mut indexer_has_more;

        loop {
            let batch = self
                .source
                .fetch_events(&EventQuery {
                    event_name: filter.event_name.clone(),
                    from_block: filter.from_block,
                    to_block: filter.to_block,
                    limit: page_size,
                    page,
                })
                .await?;
            indexer_has_more = batch.has_more;

            // An empty page ends the scan even when the indexer still
            // claims more; otherwise a source that filters after
            // paginating keeps us requesting pages forever.
            if batch.events.is_empty() {
                indexer_has_more = false;
                break;
            }
            events.extend(batch.events);

            if !indexer_has_more || events.len() as u32 >= limit {
                break;
            }
            page += 1;
        }

        let truncated = events.len() as u32 > limit;
        if truncated {
            events.truncate(limit as usize);
        }

        Ok(EventBatch {
            events,
            has_more: indexer_has_more || truncated,
        })
    }

    /// Deposit events only, newest-first as served by the indexer.
    pub async fn deposit_events(
        &self,
        limit: u32,
    ) -> Result<Vec<RawContractEvent>, EventSourceError> {
        Ok(self.events(EventFilter::named(EVENT_DEPOSIT, limit)).await?.events)
    }

    /// Withdrawal events only.
    pub async fn withdrawal_events(
        &self,
        limit: u32,
    ) -> Result<Vec<RawContractEvent>, EventSourceError> {
        Ok(self
            .events(EventFilter::named(EVENT_WITHDRAWAL, limit))
            .await?
            .events)
    }

    /// Yield-claim events only.
    pub async fn yield_claim_events(
        &self,
        limit: u32,
    ) -> Result<Vec<RawContractEvent>, EventSourceError> {
        Ok(self
            .events(EventFilter::named(EVENT_YIELD_CLAIMED, limit))
            .await?
            .events)
    }

    /// Events involving the given address: any decoded input value that
    /// equals the address case-insensitively counts as involvement.
    ///
    /// Scans at most [`SCAN_LIMIT`] events.
    pub async fn user_events(
        &self,
        address: &str,
    ) -> Result<Vec<RawContractEvent>, EventSourceError> {
        let batch = self
            .events(EventFilter {
                limit: SCAN_LIMIT,
                ..EventFilter::default()
            })
            .await?;

        Ok(batch
            .events
            .into_iter()
            .filter(|event| {
                event
                    .inputs
                    .values()
                    .any(|value| value.eq_ignore_ascii_case(address))
            })
            .collect())
    }

    /// Fold up to [`SCAN_LIMIT`] events per category into running
    /// totals and the active-user set.
    pub async fn vault_statistics(&self) -> Result<VaultStatistics, EventSourceError> {
        let deposits = self.deposit_events(SCAN_LIMIT).await?;
        let withdrawals = self.withdrawal_events(SCAN_LIMIT).await?;
        let yield_claims = self.yield_claim_events(SCAN_LIMIT).await?;

        let mut stats = VaultStatistics::default();
        for event in &deposits {
            stats.total_deposits += event.token_amount().unwrap_or_default();
        }
        for event in &withdrawals {
            stats.total_withdrawals += event.token_amount().unwrap_or_default();
        }
        for event in &yield_claims {
            stats.total_yield_paid += event.token_amount().unwrap_or_default();
        }

        for event in deposits.iter().chain(&withdrawals).chain(&yield_claims) {
            if let Some(user) = event.input("user") {
                // TODO: membership is not case-normalized, so the same
                // address in different casings counts as two users.
                stats.active_users.insert(user.to_owned());
            }
        }

        Ok(stats)
    }

    /// Recent deposits, withdrawals and yield claims fetched
    /// concurrently.
    ///
    /// Never fails: if any of the three fetches errors, the whole
    /// snapshot degrades to empty lists (`total_events == 0`) and the
    /// failure is logged.
    pub async fn recent_activity(&self, limit: u32) -> RecentActivity {
        let (deposits, withdrawals, yield_claims) = tokio::join!(
            self.deposit_events(limit),
            self.withdrawal_events(limit),
            self.yield_claim_events(limit),
        );

        match (deposits, withdrawals, yield_claims) {
            (Ok(deposits), Ok(withdrawals), Ok(yield_claims)) => RecentActivity {
                deposits,
                withdrawals,
                yield_claims,
            },
            (d, w, y) => {
                for (category, result) in
                    [("deposits", &d), ("withdrawals", &w), ("yield_claims", &y)]
                {
                    if let Err(e) = result {
                        tracing::error!(error = %e, category, "Recent activity fetch failed");
                    }
                }
                RecentActivity::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::events::testing::event;
    use async_trait::async_trait;

    /// In-memory event source honoring name filter and pagination.
    struct FakeSource {
        events: Vec<RawContractEvent>,
        fail: bool,
    }

    impl FakeSource {
        fn new(events: Vec<RawContractEvent>) -> Self {
            Self {
                events,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                events: Vec::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl EventSource for FakeSource {
        async fn fetch_events(&self, query: &EventQuery) -> Result<EventBatch, EventSourceError> {
            if self.fail {
                return Err(EventSourceError::Api("indexer unavailable".into()));
            }
            let matching: Vec<_> = self
                .events
                .iter()
                .filter(|e| {
                    query
                        .event_name
                        .as_ref()
                        .is_none_or(|name| &e.event_name == name)
                })
                .cloned()
                .collect();

            let start = ((query.page.max(1) - 1) * query.limit) as usize;
            let end = (start + query.limit as usize).min(matching.len());
            let page = if start < matching.len() {
                matching[start..end].to_vec()
            } else {
                Vec::new()
            };
            Ok(EventBatch {
                has_more: end < matching.len(),
                events: page,
            })
        }
    }

    /// Reports another page on every fetch but never yields events,
    /// like an indexer that filters results after paginating.
    struct StallingSource;

    #[async_trait]
    impl EventSource for StallingSource {
        async fn fetch_events(&self, _query: &EventQuery) -> Result<EventBatch, EventSourceError> {
            Ok(EventBatch {
                events: Vec::new(),
                has_more: true,
            })
        }
    }

    fn sample_events() -> Vec<RawContractEvent> {
        vec![
            event(EVENT_DEPOSIT, &[("user", "0xAAA"), ("amount", "1000000")]),
            event(EVENT_DEPOSIT, &[("user", "0xBBB"), ("amount", "2500000")]),
            event(
                EVENT_WITHDRAWAL,
                &[("user", "0xaaa"), ("totalWithdrawn", "500000")],
            ),
            event(EVENT_YIELD_CLAIMED, &[("user", "0xCCC"), ("amount", "100000")]),
        ]
    }

    #[tokio::test]
    async fn test_events_without_name_returns_all_types() {
        let aggregator = EventAggregator::new(FakeSource::new(sample_events()));
        let batch = aggregator.events(EventFilter::default()).await.unwrap();
        assert_eq!(batch.events.len(), 4);
        assert!(!batch.has_more);
    }

    #[tokio::test]
    async fn test_events_paginates_until_limit() {
        let events: Vec<_> = (0..250)
            .map(|i| {
                let mut e = event(EVENT_DEPOSIT, &[("user", "0xAAA"), ("amount", "1000000")]);
                e.log_index = i;
                e
            })
            .collect();
        let aggregator = EventAggregator::new(FakeSource::new(events));

        let batch = aggregator
            .events(EventFilter::named(EVENT_DEPOSIT, 150))
            .await
            .unwrap();
        assert_eq!(batch.events.len(), 150);
        assert!(batch.has_more);

        let batch = aggregator
            .events(EventFilter::named(EVENT_DEPOSIT, 1000))
            .await
            .unwrap();
        assert_eq!(batch.events.len(), 250);
        assert!(!batch.has_more);
    }

    #[tokio::test]
    async fn test_empty_page_with_has_more_terminates() {
        let aggregator = EventAggregator::new(StallingSource);
        let batch = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            aggregator.events(EventFilter::default()),
        )
        .await
        .unwrap()
        .unwrap();
        assert!(batch.events.is_empty());
        assert!(!batch.has_more);
    }

    #[tokio::test]
    async fn test_user_events_matches_case_insensitively() {
        let aggregator = EventAggregator::new(FakeSource::new(sample_events()));
        let events = aggregator.user_events("0xaaa").await.unwrap();
        // Deposit by 0xAAA and withdrawal by 0xaaa both match.
        assert_eq!(events.len(), 2);

        let events = aggregator.user_events("0xdddd").await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_vault_statistics_sums_and_counts() {
        let aggregator = EventAggregator::new(FakeSource::new(sample_events()));
        let stats = aggregator.vault_statistics().await.unwrap();

        assert_eq!(stats.total_deposits, Decimal::new(350, 2)); // 1.00 + 2.50
        assert_eq!(stats.total_withdrawals, Decimal::new(50, 2));
        assert_eq!(stats.total_yield_paid, Decimal::new(10, 2));
        // 0xAAA and 0xaaa count separately: set membership is not
        // case-normalized.
        assert_eq!(stats.active_users.len(), 4);
    }

    #[tokio::test]
    async fn test_recent_activity_totals() {
        let aggregator = EventAggregator::new(FakeSource::new(sample_events()));
        let activity = aggregator.recent_activity(10).await;
        assert_eq!(activity.deposits.len(), 2);
        assert_eq!(activity.withdrawals.len(), 1);
        assert_eq!(activity.yield_claims.len(), 1);
        assert_eq!(activity.total_events(), 4);
    }

    #[tokio::test]
    async fn test_recent_activity_zero_fills_on_failure() {
        let aggregator = EventAggregator::new(FakeSource::failing());
        let activity = aggregator.recent_activity(10).await;
        assert!(activity.deposits.is_empty());
        assert!(activity.withdrawals.is_empty());
        assert!(activity.yield_claims.is_empty());
        assert_eq!(activity.total_events(), 0);
    }

    #[tokio::test]
    async fn test_errors_propagate_from_filtered_views() {
        let aggregator = EventAggregator::new(FakeSource::failing());
        assert!(aggregator.deposit_events(10).await.is_err());
        assert!(aggregator.vault_statistics().await.is_err());
    }
}
