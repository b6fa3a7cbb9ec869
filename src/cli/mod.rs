//! CLI module for the token ledger

pub mod commands;

pub use commands::{AppState, CliResult};
