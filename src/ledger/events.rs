//! Ledger event types
//!
//! Every mutating ledger operation emits exactly one event. Events are
//! returned to the caller and retained in a bounded in-memory history so
//! external observers can audit recent activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel used as the `from` account on mint transfers.
///
/// Observers recognize supply creation by this conventional "no account"
/// value in the transfer's source field.
pub const ZERO_ACCOUNT: &str = "0x0000000000000000000000000000000000000000";

/// Maximum number of events retained in the ledger history.
pub const MAX_EVENT_HISTORY: usize = 100;

/// Transfer event (emitted by `transfer`, `transfer_from`, and `mint`)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferEvent {
    /// Source account ([`ZERO_ACCOUNT`] for mints)
    pub from: String,
    /// Destination account
    pub to: String,
    pub amount: u128,
    pub timestamp: DateTime<Utc>,
}

impl TransferEvent {
    pub fn new(from: String, to: String, amount: u128) -> Self {
        Self {
            from,
            to,
            amount,
            timestamp: Utc::now(),
        }
    }

    /// Whether this transfer records supply creation.
    pub fn is_mint(&self) -> bool {
        self.from == ZERO_ACCOUNT
    }
}

/// Approval event (emitted when an allowance is set)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApprovalEvent {
    pub owner: String,
    pub spender: String,
    pub amount: u128,
    pub timestamp: DateTime<Utc>,
}

impl ApprovalEvent {
    pub fn new(owner: String, spender: String, amount: u128) -> Self {
        Self {
            owner,
            spender,
            amount,
            timestamp: Utc::now(),
        }
    }
}

/// Either event kind, as stored in the ledger history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LedgerEvent {
    Transfer(TransferEvent),
    Approval(ApprovalEvent),
}
