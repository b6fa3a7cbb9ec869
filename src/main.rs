//! BadToken CLI Application
//!
//! A command-line interface for the permissive token ledger. The CLI is the
//! bootstrap collaborator: it instantiates the ledger once with fixed
//! metadata at `init`, and supplies caller identity for every mutating
//! operation via `--caller`.

use badtoken::cli::commands::{
    cmd_allowance, cmd_approve, cmd_balance, cmd_events, cmd_holders, cmd_info, cmd_init,
    cmd_mint, cmd_transfer, cmd_transfer_from,
};
use badtoken::cli::AppState;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "badtoken")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "A deliberately permissive ERC-20 style token ledger", long_about = None)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, default_value = ".badtoken_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new ledger
    Init {
        /// Token name
        #[arg(short, long, default_value = "Bad Token")]
        name: String,

        /// Token symbol
        #[arg(short, long, default_value = "BAD")]
        symbol: String,
    },

    /// Display ledger information
    Info,

    /// Mint new supply to the caller (open to anyone)
    Mint {
        /// Account performing the call (receives the minted amount)
        #[arg(short, long)]
        caller: String,

        /// Amount to mint
        amount: u128,
    },

    /// Transfer tokens to another account
    Transfer {
        /// Account performing the call (source of funds)
        #[arg(short, long)]
        caller: String,

        /// Recipient account
        #[arg(short, long)]
        to: String,

        /// Amount to transfer
        amount: u128,
    },

    /// Approve a spender over the caller's balance
    Approve {
        /// Account performing the call (the owner)
        #[arg(short, long)]
        caller: String,

        /// Spender account
        #[arg(short, long)]
        spender: String,

        /// Allowance amount (absolute; zero clears)
        amount: u128,
    },

    /// Transfer tokens on behalf of an owner, consuming allowance
    TransferFrom {
        /// Account performing the call (the spender)
        #[arg(short, long)]
        caller: String,

        /// Owner account to debit
        #[arg(short, long)]
        from: String,

        /// Recipient account
        #[arg(short, long)]
        to: String,

        /// Amount to transfer
        amount: u128,
    },

    /// Show the balance of an account
    Balance {
        /// Account to query
        account: String,
    },

    /// Show an allowance
    Allowance {
        /// Owner account
        owner: String,

        /// Spender account
        spender: String,
    },

    /// List all accounts with a nonzero balance
    Holders,

    /// Show recent ledger events
    Events {
        /// Maximum number of events to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name, symbol } => cmd_init(&cli.data_dir, &name, &symbol),
        Commands::Info => AppState::new(cli.data_dir).and_then(|state| cmd_info(&state)),
        Commands::Mint { caller, amount } => {
            AppState::new(cli.data_dir).and_then(|mut state| cmd_mint(&mut state, &caller, amount))
        }
        Commands::Transfer { caller, to, amount } => AppState::new(cli.data_dir)
            .and_then(|mut state| cmd_transfer(&mut state, &caller, &to, amount)),
        Commands::Approve {
            caller,
            spender,
            amount,
        } => AppState::new(cli.data_dir)
            .and_then(|mut state| cmd_approve(&mut state, &caller, &spender, amount)),
        Commands::TransferFrom {
            caller,
            from,
            to,
            amount,
        } => AppState::new(cli.data_dir)
            .and_then(|mut state| cmd_transfer_from(&mut state, &caller, &from, &to, amount)),
        Commands::Balance { account } => {
            AppState::new(cli.data_dir).and_then(|state| cmd_balance(&state, &account))
        }
        Commands::Allowance { owner, spender } => {
            AppState::new(cli.data_dir).and_then(|state| cmd_allowance(&state, &owner, &spender))
        }
        Commands::Holders => AppState::new(cli.data_dir).and_then(|state| cmd_holders(&state)),
        Commands::Events { limit } => {
            AppState::new(cli.data_dir).and_then(|state| cmd_events(&state, limit))
        }
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
