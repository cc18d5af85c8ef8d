//! # Slotwise CLI
//!
//! Wires the slot engine and the slot store to a command line:
//!
//! - **Config**: environment configuration
//! - **Commands**: the `clap` command surface
//! - **Handlers**: one function per command, writing to any [`std::io::Write`]

pub mod commands;
pub mod config;
pub mod handlers;

use std::io;

use chrono::Utc;
use eyre::Result;
use slotwise_core::IanaTimezones;
use slotwise_store::open_repository;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

use commands::{Cli, Command};
use config::AppConfig;

/// Install the global tracing subscriber. Logs go to stderr so command
/// output on stdout stays clean.
pub fn init_tracing(config: &AppConfig) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Run one parsed command against the configured store.
pub fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let config = config.with_store_dir(cli.store_dir);
    let now = Utc::now();
    let mut out = io::stdout().lock();

    debug!("Using slot store at {}", config.store_dir.display());

    match cli.command {
        Command::Timezones(args) => {
            let lookup = IanaTimezones::at(config.default_timezone, now);
            handlers::timezones::list(&lookup, &args, &mut out)?;
        }
        Command::Generate(args) => {
            let mut repo = open_repository(&config.store_dir)?;
            let form = args.into_form(config.default_timezone);
            handlers::slots::generate(&mut repo, &form, now, &mut out)?;
        }
        Command::List(args) => {
            let repo = open_repository(&config.store_dir)?;
            handlers::slots::list(&repo, &args, config.default_timezone, now, &mut out)?;
        }
        Command::Upcoming(args) => {
            let repo = open_repository(&config.store_dir)?;
            handlers::slots::upcoming(&repo, &args, config.default_timezone, now, &mut out)?;
        }
        Command::Delete(args) => {
            let mut repo = open_repository(&config.store_dir)?;
            handlers::slots::delete(&mut repo, args.id, &mut out)?;
        }
    }

    Ok(())
}
