use clap::Parser;
use kuku_cli::{cli::Cli, logging::init_tracing, operations};
use kuku_ledger::config::Config;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }

    init_tracing(config.log_filter.as_deref());

    match execute(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = config.open_ledger()?;
    let service = config.service();

    let session = match &cli.user {
        Some(user) => Some(service.login(&mut ledger, user)?),
        None => None,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    operations::run(&cli.command, &mut ledger, &service, session.as_ref(), &mut out)?;

    if let Some(session) = session {
        service.logout(session);
    }
    Ok(())
}
