use crate::types::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "budgetgoat")]
#[command(about = "Track savings pockets and transactions from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Data directory (default: ~/.budgetgoat)")]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(
        long,
        global = true,
        help = "Dump the collected diagnostics buffer to stderr before exiting"
    )]
    pub diagnostics: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory, config file and ledger database
    Init {
        #[arg(long, help = "Rewrite the config file and re-run schema setup")]
        refresh: bool,
    },

    /// Manage savings pockets
    Pocket {
        #[command(subcommand)]
        command: PocketCommand,
    },

    /// Record and inspect transactions
    Tx {
        #[command(subcommand)]
        command: TxCommand,
    },

    /// Monthly report with insights
    Report {
        #[arg(long, help = "Month to report on as YYYY-MM (default: current)")]
        month: Option<String>,
    },

    /// Read and write preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommand,
    },

    /// Check the environment and report collected diagnostics
    Doctor,
}

#[derive(Subcommand)]
pub enum PocketCommand {
    /// Create a pocket
    Add {
        name: String,

        #[arg(long, help = "Savings target as a decimal amount, e.g. 500.00")]
        target: Option<String>,
    },

    /// List pockets with balances
    List,

    /// Delete a pocket and all of its transactions
    Remove {
        /// Pocket name or id
        pocket: String,
    },

    /// Set or clear a pocket's savings target
    Target {
        /// Pocket name or id
        pocket: String,

        #[arg(help = "Decimal amount, or 'none' to clear")]
        target: String,
    },
}

#[derive(Subcommand)]
pub enum TxCommand {
    /// Record a deposit (default) or withdrawal against a pocket
    Add {
        /// Pocket name or id
        pocket: String,

        /// Decimal amount, e.g. 12.50
        #[arg(allow_hyphen_values = true)]
        amount: String,

        #[arg(long, help = "Record a withdrawal instead of a deposit")]
        withdraw: bool,

        #[arg(long)]
        note: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// List transactions, newest first
    List {
        #[arg(long, help = "Pocket name or id")]
        pocket: Option<String>,

        #[arg(long, help = "Month filter as YYYY-MM")]
        month: Option<String>,

        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Delete a transaction and revert its effect on the balance
    Remove {
        /// Transaction id
        id: String,
    },

    /// Export transactions as CSV
    Export {
        #[arg(long, help = "Write to a file instead of stdout")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum PrefsCommand {
    /// Print the stored value for a key
    Get { key: String },

    /// Store a value under a key (parsed as JSON, else kept as a string)
    Set { key: String, value: String },

    /// Remove the stored value for a key
    Unset { key: String },

    /// Print every registered key with its current value
    List,
}
