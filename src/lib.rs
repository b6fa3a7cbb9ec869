//! BadToken: a deliberately permissive fungible-token ledger in Rust
//!
//! This crate provides a single-asset accounting state machine featuring:
//! - Per-account balances with default-zero semantics
//! - An owner -> spender allowance sub-ledger for delegated transfers
//! - An unrestricted mint, open to any caller (a design property of this
//!   variant, suited to test and demo deployments only)
//! - Transfer and Approval events with a bounded in-memory history
//! - JSON persistence and a CLI host for driving the ledger by hand
//!
//! Every mutating operation is atomic: it either fully applies or fails
//! with no state change. The supply invariant holds at all times: the total
//! supply equals the sum of all balances, and it never decreases (there is
//! no burn).
//!
//! # Example
//!
//! ```rust
//! use badtoken::ledger::Ledger;
//!
//! let mut ledger = Ledger::new("Bad Token".to_string(), "BAD".to_string());
//!
//! // Anyone may mint; the amount is credited to the caller
//! ledger.mint("alice", 100).unwrap();
//! assert_eq!(ledger.total_supply(), 100);
//!
//! // Delegated spending via an allowance
//! ledger.approve("alice", "bob", 40).unwrap();
//! ledger.transfer_from("bob", "alice", "carol", 30).unwrap();
//!
//! assert_eq!(ledger.balance_of("carol"), 30);
//! assert_eq!(ledger.allowance("alice", "bob"), 10);
//! ```

pub mod cli;
pub mod ledger;
pub mod storage;

// Re-export commonly used types
pub use ledger::{
    ApprovalEvent, Ledger, LedgerError, LedgerEvent, LedgerMetadata, TransferEvent, DECIMALS,
    MAX_EVENT_HISTORY, ZERO_ACCOUNT,
};
pub use storage::{Storage, StorageError};
