//! folio - Turn a Goodreads library export into linked Markdown notes

mod cli;
mod commands;
mod error;

use std::process::ExitCode;

use clap::Parser;
use exn::ResultExt;
use folio_config::Config;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, ExportArgs};
use crate::error::{ErrorKind, Result};

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // Standard output is reserved for `print`.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    match cli.command.unwrap_or_else(|| Command::Export(ExportArgs::default())) {
        Command::Export(args) => {
            args.apply(&mut config);
            commands::export(&config, args.dry_run).await
        },
        Command::Print(args) => {
            args.apply(&mut config);
            commands::print(&config, args.section)
        },
    }
}
