//! Vault event API types.
//!
//! These are read-only projections of the on-chain vault contract's event
//! log, already decoded and formatted for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single vault event shaped for direct rendering by the frontend.
///
/// `amount` is a fixed two-decimal string in whole tokens (the contract
/// emits base units at 6 decimals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub user: String,
    pub amount: String,
    pub timestamp: i64,
    pub tx_hash: String,
    pub block_height: i64,
}

/// Query parameters for `GET /api/vault/events`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultEventsQuery {
    /// Event name filter; absent means all event types.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Restrict to events involving this address (case-insensitive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Response of `GET /api/vault/events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultEventsResponse {
    pub events: Vec<DisplayEvent>,
    pub has_more: bool,
}

/// Response of `GET /api/vault/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultStatsResponse {
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub total_yield_paid: Decimal,
    pub active_users: u64,
}

/// Response of `GET /api/vault/activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivityResponse {
    pub deposits: Vec<DisplayEvent>,
    pub withdrawals: Vec<DisplayEvent>,
    pub yield_claims: Vec<DisplayEvent>,
    pub total_events: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_event_uses_type_key() {
        let event = DisplayEvent {
            event_type: "DepositSuccessful".into(),
            user: "0xabc".into(),
            amount: "12.50".into(),
            timestamp: 1_700_000_000,
            tx_hash: "0xdead".into(),
            block_height: 42,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "DepositSuccessful");
        assert_eq!(json["txHash"], "0xdead");
        assert_eq!(json["blockHeight"], 42);
    }
}
