//! Fungible-token ledger state machine
//!
//! Tracks balances, a nested owner -> spender allowance map, and total
//! supply for a single asset. Every mutating operation is atomic: all
//! checks run before any state is touched, so a failed call leaves the
//! ledger exactly as it was.

use crate::ledger::events::{
    ApprovalEvent, LedgerEvent, TransferEvent, MAX_EVENT_HISTORY, ZERO_ACCOUNT,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Decimal places, fixed for every ledger instance.
pub const DECIMALS: u8 = 18;

/// Ledger errors. All are fatal to the operation in progress; there is no
/// partial application or recovery path inside the ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: u128, need: u128 },
    #[error("Arithmetic overflow: increment exceeds representable range")]
    ArithmeticOverflow,
}

/// Ledger metadata (immutable after creation)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LedgerMetadata {
    /// Asset name (e.g., "Bad Token")
    pub name: String,
    /// Asset symbol (e.g., "BAD")
    pub symbol: String,
    /// Decimal places, always [`DECIMALS`]
    pub decimals: u8,
}

impl LedgerMetadata {
    pub fn new(name: String, symbol: String) -> Self {
        Self {
            name,
            symbol,
            decimals: DECIMALS,
        }
    }
}

/// A single-asset fungible-token ledger.
///
/// Accounts are opaque string identifiers supplied by the host; the caller
/// of each mutating operation is passed in explicitly. The ledger assumes a
/// single-writer discipline: mutating methods take `&mut self`, and a host
/// exposing it behind a concurrent interface must serialize mutations with
/// a lock.
///
/// Supply starts at zero and grows only through [`Ledger::mint`], which any
/// account may call. That open mint is a deliberate property of this
/// variant, intended for test and demo deployments; do not point real value
/// at it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ledger {
    metadata: LedgerMetadata,
    /// Invariant: always equals the sum of all balances
    total_supply: u128,
    /// Balances: account -> amount (absent means zero)
    balances: HashMap<String, u128>,
    /// Allowances: owner -> (spender -> amount)
    allowances: HashMap<String, HashMap<String, u128>>,
    /// Recent events (last 100)
    events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Create a new ledger with zero supply.
    pub fn new(name: String, symbol: String) -> Self {
        Self {
            metadata: LedgerMetadata::new(name, symbol),
            total_supply: 0,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            events: Vec::new(),
        }
    }

    // =========================================================================
    // View Functions
    // =========================================================================

    /// Get the asset name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Get the asset symbol
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Get decimal places
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Get the ledger metadata
    pub fn metadata(&self) -> &LedgerMetadata {
        &self.metadata
    }

    /// Get current total supply
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Get the balance of an account (zero if never credited)
    pub fn balance_of(&self, account: &str) -> u128 {
        *self.balances.get(account).unwrap_or(&0)
    }

    /// Get the allowance a spender holds over an owner's balance (zero if
    /// never set)
    pub fn allowance(&self, owner: &str, spender: &str) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Get all accounts with a nonzero balance
    pub fn holders(&self) -> Vec<(&String, &u128)> {
        self.balances.iter().filter(|(_, &b)| b > 0).collect()
    }

    /// Get the number of accounts with a nonzero balance
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|&&b| b > 0).count()
    }

    /// Get the recent event history (oldest first, capped at 100)
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    // =========================================================================
    // Mutating Functions
    // =========================================================================

    /// Mint new supply, credited to the caller.
    ///
    /// Callable by any account; there is no authorization check. Fails with
    /// [`LedgerError::ArithmeticOverflow`] if either the caller's balance or
    /// the total supply would exceed `u128::MAX`.
    pub fn mint(&mut self, caller: &str, amount: u128) -> Result<TransferEvent, LedgerError> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let new_balance = self
            .balance_of(caller)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        self.total_supply = new_supply;
        self.balances.insert(caller.to_string(), new_balance);

        log::info!(
            "Minted {} {} to {} (supply now {})",
            amount,
            self.metadata.symbol,
            caller,
            self.total_supply
        );

        let event = TransferEvent::new(ZERO_ACCOUNT.to_string(), caller.to_string(), amount);
        self.record(LedgerEvent::Transfer(event.clone()));

        Ok(event)
    }

    /// Transfer tokens from the caller to another account.
    ///
    /// Zero-amount transfers and self-transfers are valid; both leave the
    /// balances numerically unchanged and still emit the event.
    pub fn transfer(
        &mut self,
        caller: &str,
        to: &str,
        amount: u128,
    ) -> Result<TransferEvent, LedgerError> {
        let from_balance = self.balance_of(caller);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        // All checks done; compute both sides before writing either so a
        // failure cannot leave a half-applied move.
        let (debited, credited) = if caller == to {
            (from_balance, from_balance)
        } else {
            let credited = self
                .balance_of(to)
                .checked_add(amount)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            (from_balance - amount, credited)
        };

        self.balances.insert(caller.to_string(), debited);
        self.balances.insert(to.to_string(), credited);

        log::debug!("Transfer {} {} -> {}", amount, caller, to);

        let event = TransferEvent::new(caller.to_string(), to.to_string(), amount);
        self.record(LedgerEvent::Transfer(event.clone()));

        Ok(event)
    }

    /// Approve a spender to move tokens out of the caller's balance.
    ///
    /// This is an absolute set, not additive: a second approve overwrites
    /// the previous allowance. Zero clears it. Always succeeds.
    pub fn approve(
        &mut self,
        caller: &str,
        spender: &str,
        amount: u128,
    ) -> Result<ApprovalEvent, LedgerError> {
        self.allowances
            .entry(caller.to_string())
            .or_insert_with(HashMap::new)
            .insert(spender.to_string(), amount);

        log::debug!("Approval {} by {} for {}", amount, caller, spender);

        let event = ApprovalEvent::new(caller.to_string(), spender.to_string(), amount);
        self.record(LedgerEvent::Approval(event.clone()));

        Ok(event)
    }

    /// Transfer tokens on behalf of an owner, consuming allowance.
    ///
    /// The caller is the spender. The allowance is checked before the
    /// owner's balance; both must cover `amount` before anything moves.
    /// Emits only a `Transfer` event; the allowance decrement produces no
    /// `Approval` event and must be observed by re-querying
    /// [`Ledger::allowance`].
    pub fn transfer_from(
        &mut self,
        caller: &str,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<TransferEvent, LedgerError> {
        let current_allowance = self.allowance(from, caller);
        if current_allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                have: current_allowance,
                need: amount,
            });
        }

        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        let (debited, credited) = if from == to {
            (from_balance, from_balance)
        } else {
            let credited = self
                .balance_of(to)
                .checked_add(amount)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            (from_balance - amount, credited)
        };

        self.allowances
            .entry(from.to_string())
            .or_insert_with(HashMap::new)
            .insert(caller.to_string(), current_allowance - amount);

        self.balances.insert(from.to_string(), debited);
        self.balances.insert(to.to_string(), credited);

        log::debug!(
            "TransferFrom {} {} -> {} (spender {}, allowance left {})",
            amount,
            from,
            to,
            caller,
            current_allowance - amount
        );

        let event = TransferEvent::new(from.to_string(), to.to_string(), amount);
        self.record(LedgerEvent::Transfer(event.clone()));

        Ok(event)
    }

    /// Store an event, keeping the last [`MAX_EVENT_HISTORY`] entries
    fn record(&mut self, event: LedgerEvent) {
        self.events.push(event);
        if self.events.len() > MAX_EVENT_HISTORY {
            self.events.remove(0);
        }
    }
}
