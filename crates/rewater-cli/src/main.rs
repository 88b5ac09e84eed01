mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::Cli;
use crate::error::{EXIT_USAGE, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, info};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
                _ => EXIT_USAGE,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run_app(&cli) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_app(cli: &Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("Rewater CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", cli);

    if cli.list_models {
        info!("Dispatching to model listing.");
        let registry = config::build_registry(cli)?;
        return commands::models::run(&registry);
    }

    let app_config = config::build_config(cli)?;
    debug!(
        "{} water models available.",
        app_config.registry.names().len()
    );
    info!(
        "Dispatching to conversion with model '{}'.",
        app_config.model.name()
    );
    commands::convert::run(&app_config)?;

    info!("Command completed successfully.");
    Ok(())
}
