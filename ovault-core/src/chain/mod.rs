//! On-chain vault event projection.
//!
//! The vault contract itself lives on-chain; this module only reads its
//! decoded event log through a vendor indexer API and reshapes it for
//! display. Nothing here ever writes to the chain.

pub mod aggregator;
pub mod client;
pub mod events;

pub use aggregator::{
    DEFAULT_FETCH_LIMIT, EventAggregator, EventFilter, RecentActivity, VaultStatistics,
};
pub use client::{ChainConfig, EventBatch, EventQuery, EventSource, EventSourceError, VaultEventClient};
pub use events::{RawContractEvent, format_event_for_display};
