//! Command-line entry point wiring
//!
//! Loads configuration, connects to the accounting service and hands the
//! remaining arguments to the command for the requested entity type.

pub mod app;
pub mod commands;

pub use app::{Cli, Commands};
pub use commands::{EntityArgs, EntityKind};

use crate::admin::{Console, ReportPrinter, Status};
use crate::api::RestStore;
use crate::commands::federation;
use crate::config::Config;
use crate::ui::{AutoConfirm, Confirmation, InteractiveConfirm};
use anyhow::Result;
use log::debug;
use std::io;

/// Load the configuration named on the command line, or the default one
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config.with_env_overrides())
}

/// Report printer honouring command-line flags over configured settings
pub fn build_printer(cli: &Cli, config: &Config) -> ReportPrinter {
    let mode = cli.print_mode().unwrap_or(config.settings.parsable);
    let delimiter = cli
        .delimiter
        .clone()
        .unwrap_or_else(|| config.settings.delimiter.clone());
    ReportPrinter::new(mode).with_delimiter(delimiter)
}

/// Execute the parsed command against the configured accounting service
pub async fn run(cli: Cli) -> Result<Status> {
    let config = load_config(&cli)?;
    debug!("Using accounting service at {}", config.storage.url);

    let mut store = RestStore::new(&config.storage)?;
    let printer = build_printer(&cli, &config);
    let mut confirm: Box<dyn Confirmation> = if cli.immediate || config.settings.immediate {
        Box::new(AutoConfirm::yes())
    } else {
        Box::new(InteractiveConfirm)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err = io::stderr();
    let mut console = Console::new(&mut out, &mut err);

    match cli.command {
        Commands::Add(target) => match target.entity {
            EntityKind::Federation => {
                federation::add_command(&mut store, confirm.as_mut(), &mut console, &target.args)
                    .await
            }
        },
        Commands::List(target) => match target.entity {
            EntityKind::Federation => {
                federation::list_command(&mut store, &printer, &mut console, &target.args).await
            }
        },
    }
}
