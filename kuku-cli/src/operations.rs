use std::error::Error;
use std::fs;
use std::io::Write;

use kuku_common::{genesis::TOKEN_SYMBOL, utils::time::to_iso8601};
use kuku_ledger::core::runtime::store::StateStore;
use kuku_ledger::interface::service::{Session, TokenService};
use kuku_ledger::Ledger;
use tracing::info;

use crate::cli::Commands;

/// Executes one subcommand against an already opened ledger, writing
/// user-facing output to `out`.
pub fn run<S: StateStore, W: Write>(
    command: &Commands,
    ledger: &mut Ledger<S>,
    service: &TokenService,
    session: Option<&Session>,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Balance { id } => {
            let balance = service.check_balance(ledger, id)?;
            writeln!(out, "{}'s balance: {} {}", id.trim(), balance, TOKEN_SYMBOL)?;
        }
        Commands::Transfer { to, amount } => {
            let session = Session::require(session)?;
            let receipt = service.transfer(ledger, session, to, *amount)?;
            writeln!(out, "{}", receipt.message)?;
        }
        Commands::Mint { to, amount } => {
            let session = Session::require(session)?;
            let receipt = service.mint(ledger, session, to, *amount)?;
            writeln!(out, "{}", receipt.message)?;
        }
        Commands::Supply => {
            writeln!(out, "Total supply: {} {}", ledger.total_supply(), TOKEN_SYMBOL)?;
        }
        Commands::History { limit } => {
            if ledger.history().is_empty() {
                writeln!(out, "No transactions yet")?;
            }
            for record in ledger.history().iter().take(*limit) {
                writeln!(
                    out,
                    "{}  {:<8}  {}  {} {}",
                    to_iso8601(&record.timestamp),
                    record.kind,
                    record.description,
                    record.amount,
                    TOKEN_SYMBOL
                )?;
            }
        }
        Commands::Export { path } => {
            let json = service.export_state(ledger).to_json_pretty()?;
            fs::write(path, json)?;
            info!("Exported ledger to {}", path.display());
            writeln!(out, "Data exported to {}", path.display())?;
        }
        Commands::Import { path } => {
            let raw = fs::read_to_string(path)?;
            service.import_state(ledger, &raw)?;
            writeln!(out, "Data imported from {}", path.display())?;
        }
        Commands::Reset { yes } => {
            if !*yes {
                return Err("refusing to delete all data without --yes".into());
            }
            service.reset_all(ledger)?;
            writeln!(out, "All data has been reset to defaults.")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuku_common::LedgerError;
    use kuku_ledger::core::runtime::store::MemoryStore;

    fn run_to_string(
        command: Commands,
        ledger: &mut Ledger<MemoryStore>,
        session: Option<&Session>,
    ) -> Result<String, Box<dyn Error>> {
        let mut out = Vec::new();
        run(&command, ledger, &TokenService::default(), session, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_transfer_requires_login() {
        let mut ledger = Ledger::open(MemoryStore::new(), "kukuCoinData").unwrap();
        let err = run_to_string(
            Commands::Transfer { to: "alice".into(), amount: 5 },
            &mut ledger,
            None,
        )
        .unwrap_err();
        assert_eq!(err.downcast_ref::<LedgerError>(), Some(&LedgerError::NotLoggedIn));
    }

    #[test]
    fn test_balance_and_transfer_output() {
        let mut ledger = Ledger::open(MemoryStore::new(), "kukuCoinData").unwrap();
        let session = TokenService::default().login(&mut ledger, "admin").unwrap();

        let out = run_to_string(
            Commands::Transfer { to: "alice".into(), amount: 500 },
            &mut ledger,
            Some(&session),
        )
        .unwrap();
        assert_eq!(out, "Transfer successful! Sent 500 K to alice\n");

        let out = run_to_string(Commands::Balance { id: "alice".into() }, &mut ledger, None).unwrap();
        assert_eq!(out, "alice's balance: 500 K\n");

        let out = run_to_string(Commands::History { limit: 1 }, &mut ledger, None).unwrap();
        assert!(out.contains("transfer"));
        assert!(out.contains("admin → alice"));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let mut ledger = Ledger::open(MemoryStore::new(), "kukuCoinData").unwrap();
        assert!(run_to_string(Commands::Reset { yes: false }, &mut ledger, None).is_err());
        assert!(run_to_string(Commands::Reset { yes: true }, &mut ledger, None).is_ok());
    }
}
