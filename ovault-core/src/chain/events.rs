//! Raw contract events and display formatting.

use std::collections::BTreeMap;

use ovault_sdk::objects::events::DisplayEvent;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Vault event emitted on a successful deposit. Inputs: `user`, `amount`.
pub const EVENT_DEPOSIT: &str = "DepositSuccessful";
/// Vault event emitted on a successful withdrawal. Inputs: `user`,
/// `totalWithdrawn`.
pub const EVENT_WITHDRAWAL: &str = "WithdrawalSuccessful";
/// Vault event emitted when accrued yield is claimed. Inputs: `user`,
/// `amount`.
pub const EVENT_YIELD_CLAIMED: &str = "YieldClaimed";

const INPUT_USER: &str = "user";
const INPUT_AMOUNT: &str = "amount";
const INPUT_TOTAL_WITHDRAWN: &str = "totalWithdrawn";

/// The vault token uses 6 decimals (USDC convention); amounts on the wire
/// are base-unit integers scaled by 1e6.
const TOKEN_SCALE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// A decoded event from the vault contract's log, as returned by the
/// indexer API. Identity is `(tx_hash, log_index)`; immutable once
/// observed.
///
/// Decoded inputs are a name → value map, so a missing field is an
/// explicit absent key rather than a silent empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContractEvent {
    pub event_name: String,
    pub tx_hash: String,
    pub log_index: i64,
    pub block_number: i64,
    pub block_hash: String,
    pub contract_address: String,
    pub block_timestamp: i64,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
}

impl RawContractEvent {
    /// Look up a decoded input by name.
    pub fn input(&self, name: &str) -> Option<&str> {
        self.inputs.get(name).map(String::as_str)
    }

    /// The name of the input carrying this event's token amount, if the
    /// event type is known.
    pub fn amount_input_name(&self) -> Option<&'static str> {
        match self.event_name.as_str() {
            EVENT_DEPOSIT | EVENT_YIELD_CLAIMED => Some(INPUT_AMOUNT),
            EVENT_WITHDRAWAL => Some(INPUT_TOTAL_WITHDRAWN),
            _ => None,
        }
    }

    /// Parse this event's token amount into whole tokens.
    pub fn token_amount(&self) -> Option<Decimal> {
        let raw = self.input(self.amount_input_name()?)?;
        parse_base_units(raw)
    }
}

/// Parse a base-unit integer string into whole tokens (scaled by 1e-6).
pub fn parse_base_units(raw: &str) -> Option<Decimal> {
    let value: Decimal = raw.trim().parse().ok()?;
    Some(value / TOKEN_SCALE)
}

/// Format a base-unit amount string as a two-decimal token string, e.g.
/// `"2500000"` → `"2.50"`. Malformed input formats as `"0.00"`.
pub fn format_base_units(raw: &str) -> String {
    let tokens = parse_base_units(raw).unwrap_or(Decimal::ZERO);
    format_tokens(tokens)
}

fn format_tokens(tokens: Decimal) -> String {
    // Round half away from zero to match the frontend's toFixed(2).
    format!(
        "{:.2}",
        tokens.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Map a raw event into its display shape. Pure: unknown event names or
/// missing inputs produce degenerate empty values, never an error.
pub fn format_event_for_display(event: &RawContractEvent) -> DisplayEvent {
    let user = match event.amount_input_name() {
        Some(_) => event.input(INPUT_USER).unwrap_or_default().to_owned(),
        None => String::new(),
    };
    let amount = event
        .amount_input_name()
        .and_then(|name| event.input(name))
        .map(format_base_units)
        .unwrap_or_else(|| "0.00".to_owned());

    DisplayEvent {
        event_type: event.event_name.clone(),
        user,
        amount,
        timestamp: event.block_timestamp,
        tx_hash: event.tx_hash.clone(),
        block_height: event.block_number,
    }
}

/// Test fixture builder shared by the chain module's unit tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::RawContractEvent;

    pub(crate) fn event(name: &str, inputs: &[(&str, &str)]) -> RawContractEvent {
        RawContractEvent {
            event_name: name.to_owned(),
            tx_hash: "0xfeed".to_owned(),
            log_index: 0,
            block_number: 1234,
            block_hash: "0xbeef".to_owned(),
            contract_address: "0x0000000000000000000000000000000000000001".to_owned(),
            block_timestamp: 1_700_000_000,
            inputs: inputs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::event;
    use super::*;

    #[test]
    fn test_format_deposit_event() {
        let raw = event(EVENT_DEPOSIT, &[("user", "0xAbC"), ("amount", "2500000")]);
        let display = format_event_for_display(&raw);
        assert_eq!(display.event_type, "DepositSuccessful");
        assert_eq!(display.user, "0xAbC");
        assert_eq!(display.amount, "2.50");
        assert_eq!(display.tx_hash, "0xfeed");
        assert_eq!(display.block_height, 1234);
        assert_eq!(display.timestamp, 1_700_000_000);
    }

    #[test]
    fn test_format_withdrawal_uses_total_withdrawn() {
        let raw = event(
            EVENT_WITHDRAWAL,
            &[("user", "0xAbC"), ("totalWithdrawn", "10000000")],
        );
        assert_eq!(format_event_for_display(&raw).amount, "10.00");
    }

    #[test]
    fn test_format_yield_claimed() {
        let raw = event(EVENT_YIELD_CLAIMED, &[("user", "0xAbC"), ("amount", "1234567")]);
        assert_eq!(format_event_for_display(&raw).amount, "1.23");
    }

    #[test]
    fn test_unknown_event_yields_empty_values() {
        let raw = event("OwnershipTransferred", &[("newOwner", "0xAbC")]);
        let display = format_event_for_display(&raw);
        assert_eq!(display.user, "");
        assert_eq!(display.amount, "0.00");
        assert_eq!(display.event_type, "OwnershipTransferred");
    }

    #[test]
    fn test_missing_inputs_degrade_silently() {
        let raw = event(EVENT_DEPOSIT, &[]);
        let display = format_event_for_display(&raw);
        assert_eq!(display.user, "");
        assert_eq!(display.amount, "0.00");
    }

    #[test]
    fn test_amount_matches_to_fixed_two() {
        // (v / 1e6).toFixed(2) equivalence.
        assert_eq!(format_base_units("0"), "0.00");
        assert_eq!(format_base_units("1"), "0.00");
        assert_eq!(format_base_units("1000000"), "1.00");
        assert_eq!(format_base_units("1235000"), "1.24");
        assert_eq!(format_base_units("999999999999"), "1000000.00");
        assert_eq!(format_base_units("not-a-number"), "0.00");
    }
}
