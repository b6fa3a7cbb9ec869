//! ERC-20 style fungible-token ledger
//!
//! Provides a single-asset accounting state machine with:
//! - Balances per account (default zero)
//! - Allowances for delegated transfers
//! - An unrestricted mint, open to any caller by design
//! - Transfer and Approval events with a bounded history
//!
//! # Example
//!
//! ```rust
//! use badtoken::ledger::Ledger;
//!
//! let mut ledger = Ledger::new("Bad Token".to_string(), "BAD".to_string());
//!
//! // Anyone may mint; supply is credited to the caller
//! ledger.mint("alice", 100).unwrap();
//!
//! // Direct transfer
//! ledger.transfer("alice", "bob", 40).unwrap();
//!
//! // Delegated transfer
//! ledger.approve("alice", "bob", 30).unwrap();
//! ledger.transfer_from("bob", "alice", "carol", 30).unwrap();
//!
//! assert_eq!(ledger.balance_of("alice"), 30);
//! assert_eq!(ledger.total_supply(), 100);
//! ```

pub mod events;
pub mod ledger;

pub use events::{ApprovalEvent, LedgerEvent, TransferEvent, MAX_EVENT_HISTORY, ZERO_ACCOUNT};
pub use ledger::{Ledger, LedgerError, LedgerMetadata, DECIMALS};
