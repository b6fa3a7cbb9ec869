//! CLI commands for the token ledger
//!
//! Implements all command handlers for the CLI interface. Each handler
//! loads the ledger, applies at most one operation, and saves; strictly
//! serial, which keeps the single-writer discipline the ledger expects.

use crate::ledger::{Ledger, LedgerEvent};
use crate::storage::Storage;
use std::path::PathBuf;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub ledger: Ledger,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load application state from an initialized data directory
    pub fn new(data_dir: PathBuf) -> CliResult<Self> {
        let storage = Storage::open(&data_dir)?;

        if !storage.exists() {
            return Err(format!(
                "No ledger found in {:?}. Run `badtoken init` first.",
                data_dir
            )
            .into());
        }

        let ledger = storage.load()?;

        Ok(Self {
            ledger,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.ledger)?;
        Ok(())
    }
}

/// Initialize a new ledger with fixed metadata
pub fn cmd_init(data_dir: &PathBuf, name: &str, symbol: &str) -> CliResult<()> {
    let storage = Storage::open(data_dir)?;

    if storage.exists() {
        println!("⚠️  Ledger already exists at {:?}", data_dir);
        println!("   Delete the data directory to reinitialize");
        return Ok(());
    }

    let ledger = Ledger::new(name.to_string(), symbol.to_string());
    storage.save(&ledger)?;

    println!("✅ Ledger initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   🪙 Token: {} ({})", ledger.name(), ledger.symbol());
    println!("   🔢 Decimals: {}", ledger.decimals());
    println!("   ⚠️  Mint is open to any caller (test/demo use only)");

    Ok(())
}

/// Display ledger information
pub fn cmd_info(state: &AppState) -> CliResult<()> {
    let ledger = &state.ledger;

    println!("🪙 {} ({})", ledger.name(), ledger.symbol());
    println!("   ├─ Decimals: {}", ledger.decimals());
    println!("   ├─ Total supply: {}", ledger.total_supply());
    println!("   ├─ Holders: {}", ledger.holder_count());
    println!("   └─ Recent events: {}", ledger.events().len());

    Ok(())
}

/// Mint new supply to the caller
pub fn cmd_mint(state: &mut AppState, caller: &str, amount: u128) -> CliResult<()> {
    let event = state.ledger.mint(caller, amount)?;
    state.save()?;

    println!("✅ Minted {} {} to {}", event.amount, state.ledger.symbol(), event.to);
    println!("   💰 Balance: {}", state.ledger.balance_of(caller));
    println!("   📊 Total supply: {}", state.ledger.total_supply());

    Ok(())
}

/// Transfer tokens from the caller to another account
pub fn cmd_transfer(state: &mut AppState, caller: &str, to: &str, amount: u128) -> CliResult<()> {
    let event = state.ledger.transfer(caller, to, amount)?;
    state.save()?;

    println!("✅ Transferred {} {}", event.amount, state.ledger.symbol());
    println!("   ├─ From: {} (balance {})", caller, state.ledger.balance_of(caller));
    println!("   └─ To:   {} (balance {})", to, state.ledger.balance_of(to));

    Ok(())
}

/// Approve a spender over the caller's balance
pub fn cmd_approve(
    state: &mut AppState,
    caller: &str,
    spender: &str,
    amount: u128,
) -> CliResult<()> {
    let event = state.ledger.approve(caller, spender, amount)?;
    state.save()?;

    println!(
        "✅ Approved {} to spend {} {}",
        event.spender,
        event.amount,
        state.ledger.symbol()
    );
    println!("   📝 Allowance: {}", state.ledger.allowance(caller, spender));

    Ok(())
}

/// Delegated transfer: caller spends from an owner's balance
pub fn cmd_transfer_from(
    state: &mut AppState,
    caller: &str,
    from: &str,
    to: &str,
    amount: u128,
) -> CliResult<()> {
    let event = state.ledger.transfer_from(caller, from, to, amount)?;
    state.save()?;

    println!("✅ Transferred {} {} on behalf of {}", event.amount, state.ledger.symbol(), from);
    println!("   ├─ From: {} (balance {})", from, state.ledger.balance_of(from));
    println!("   ├─ To:   {} (balance {})", to, state.ledger.balance_of(to));
    println!("   └─ Remaining allowance: {}", state.ledger.allowance(from, caller));

    Ok(())
}

/// Show the balance of an account
pub fn cmd_balance(state: &AppState, account: &str) -> CliResult<()> {
    println!(
        "💰 {}: {} {}",
        account,
        state.ledger.balance_of(account),
        state.ledger.symbol()
    );

    Ok(())
}

/// Show the allowance a spender holds over an owner's balance
pub fn cmd_allowance(state: &AppState, owner: &str, spender: &str) -> CliResult<()> {
    println!(
        "📝 {} may spend {} {} from {}",
        spender,
        state.ledger.allowance(owner, spender),
        state.ledger.symbol(),
        owner
    );

    Ok(())
}

/// List all accounts with a nonzero balance
pub fn cmd_holders(state: &AppState) -> CliResult<()> {
    let mut holders = state.ledger.holders();
    holders.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!("👥 {} holder(s):", holders.len());
    for (account, balance) in holders {
        println!("   {}: {} {}", account, balance, state.ledger.symbol());
    }

    Ok(())
}

/// Show recent ledger events, newest last
pub fn cmd_events(state: &AppState, limit: usize) -> CliResult<()> {
    let events = state.ledger.events();
    let start = events.len().saturating_sub(limit);

    println!("📜 {} event(s):", events.len() - start);
    for event in &events[start..] {
        match event {
            LedgerEvent::Transfer(t) if t.is_mint() => {
                println!(
                    "   [{}] Mint     {} -> {}",
                    t.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    t.amount,
                    t.to
                );
            }
            LedgerEvent::Transfer(t) => {
                println!(
                    "   [{}] Transfer {} {} -> {}",
                    t.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    t.amount,
                    t.from,
                    t.to
                );
            }
            LedgerEvent::Approval(a) => {
                println!(
                    "   [{}] Approval {} {} -> {}",
                    a.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    a.amount,
                    a.owner,
                    a.spender
                );
            }
        }
    }

    Ok(())
}
