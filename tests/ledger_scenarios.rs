//! End-to-end ledger scenarios
//!
//! Multi-account operation sequences exercising the full contract surface,
//! including the persistence round-trip the CLI host relies on.

use badtoken::ledger::{Ledger, LedgerError, ZERO_ACCOUNT};
use badtoken::storage::Storage;

fn fresh_ledger() -> Ledger {
    Ledger::new("Bad Token".to_string(), "BAD".to_string())
}

fn sum_of_balances(ledger: &Ledger) -> u128 {
    ledger.holders().iter().map(|(_, &b)| b).sum()
}

#[test]
fn mint_approve_transfer_from_flow() {
    let mut ledger = fresh_ledger();

    // A mints 100
    ledger.mint("A", 100).unwrap();
    assert_eq!(ledger.balance_of("A"), 100);
    assert_eq!(ledger.total_supply(), 100);

    // A approves B for 40
    ledger.approve("A", "B", 40).unwrap();
    assert_eq!(ledger.allowance("A", "B"), 40);

    // B moves 30 from A to C
    ledger.transfer_from("B", "A", "C", 30).unwrap();
    assert_eq!(ledger.balance_of("A"), 70);
    assert_eq!(ledger.balance_of("C"), 30);
    assert_eq!(ledger.allowance("A", "B"), 10);

    // B tries to move 20 more; only 10 allowance remains
    let result = ledger.transfer_from("B", "A", "C", 20);
    assert!(matches!(
        result,
        Err(LedgerError::InsufficientAllowance { have: 10, need: 20 })
    ));

    // State unchanged from the previous step
    assert_eq!(ledger.balance_of("A"), 70);
    assert_eq!(ledger.balance_of("C"), 30);
    assert_eq!(ledger.allowance("A", "B"), 10);
    assert_eq!(ledger.total_supply(), 100);
}

#[test]
fn supply_invariant_over_mixed_operations() {
    let mut ledger = fresh_ledger();

    ledger.mint("alice", 1_000).unwrap();
    ledger.mint("bob", 2_500).unwrap();
    ledger.transfer("alice", "carol", 400).unwrap();
    ledger.approve("bob", "carol", 2_000).unwrap();
    ledger.transfer_from("carol", "bob", "dave", 1_500).unwrap();
    ledger.transfer("dave", "dave", 750).unwrap();
    ledger.transfer("carol", "alice", 0).unwrap();
    ledger.mint("dave", 42).unwrap();

    // Failed operations must not disturb the invariant either
    let _ = ledger.transfer("alice", "bob", u128::MAX);
    let _ = ledger.transfer_from("nobody", "alice", "bob", 1);

    assert_eq!(ledger.total_supply(), 3_542);
    assert_eq!(sum_of_balances(&ledger), ledger.total_supply());
}

#[test]
fn supply_never_decreases() {
    let mut ledger = fresh_ledger();
    let mut observed = vec![ledger.total_supply()];

    ledger.mint("alice", 500).unwrap();
    observed.push(ledger.total_supply());

    ledger.transfer("alice", "bob", 500).unwrap();
    observed.push(ledger.total_supply());

    ledger.approve("bob", "alice", 500).unwrap();
    ledger.transfer_from("alice", "bob", "carol", 500).unwrap();
    observed.push(ledger.total_supply());

    let _ = ledger.transfer("carol", "alice", 501);
    observed.push(ledger.total_supply());

    assert!(observed.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn mint_emits_transfer_from_zero_account() {
    let mut ledger = fresh_ledger();

    let event = ledger.mint("minter", 77).unwrap();

    assert_eq!(event.from, ZERO_ACCOUNT);
    assert_eq!(event.to, "minter");
    assert_eq!(event.amount, 77);
    assert!(event.is_mint());
}

#[test]
fn zero_amount_operations_are_observable_noops() {
    let mut ledger = fresh_ledger();
    ledger.mint("alice", 10).unwrap();
    let events_before = ledger.events().len();

    let transfer = ledger.transfer("alice", "bob", 0).unwrap();
    let approval = ledger.approve("alice", "bob", 0).unwrap();

    assert_eq!(transfer.amount, 0);
    assert_eq!(approval.amount, 0);
    assert_eq!(ledger.balance_of("alice"), 10);
    assert_eq!(ledger.balance_of("bob"), 0);
    assert_eq!(ledger.allowance("alice", "bob"), 0);
    // Both notifications were still emitted
    assert_eq!(ledger.events().len(), events_before + 2);
}

#[test]
fn state_survives_persistence_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let storage = Storage::open(temp_dir.path()).unwrap();

    let mut ledger = fresh_ledger();
    ledger.mint("A", 100).unwrap();
    ledger.approve("A", "B", 40).unwrap();
    ledger.transfer_from("B", "A", "C", 30).unwrap();
    storage.save(&ledger).unwrap();

    // A fresh host picks up exactly where the last one stopped
    let mut reloaded = storage.load().unwrap();
    assert_eq!(reloaded.metadata(), ledger.metadata());
    assert_eq!(reloaded.total_supply(), 100);
    assert_eq!(reloaded.balance_of("A"), 70);
    assert_eq!(reloaded.balance_of("C"), 30);
    assert_eq!(reloaded.allowance("A", "B"), 10);

    let result = reloaded.transfer_from("B", "A", "C", 20);
    assert!(matches!(
        result,
        Err(LedgerError::InsufficientAllowance { have: 10, need: 20 })
    ));
}
