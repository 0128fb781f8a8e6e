use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kuku")]
#[command(about = "KuKu Coin token ledger")]
pub struct Cli {
    /// JSON config file; defaults apply when it does not exist
    #[arg(long, global = true, value_name = "FILE", default_value = "kuku.json")]
    pub config: PathBuf,

    /// Overrides the configured data directory
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log in as this account for transfer and mint
    #[arg(long = "as", global = true, value_name = "ACCOUNT")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Show an account's balance (unknown accounts are created at zero)
    Balance {
        #[arg(value_name = "ACCOUNT")]
        id: String,
    },
    /// Send tokens from the logged-in account
    Transfer {
        #[arg(value_name = "TO")]
        to: String,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Create new tokens for an account
    Mint {
        #[arg(value_name = "TO")]
        to: String,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Show the total supply
    Supply,
    /// List recent transactions, newest first
    History {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Write the full state plus token metadata to a JSON file
    Export {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Replace the full state from a JSON file
    Import {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Delete all data and return to genesis
    Reset {
        #[arg(long)]
        yes: bool,
    },
}
