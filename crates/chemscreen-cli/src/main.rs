mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\nError: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(logging::LogSettings::from_flags(
        cli.verbose,
        cli.quiet,
        cli.log_file.clone(),
    ))?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("chemscreen CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = match cli.command {
        Commands::Count(args) => {
            info!("Dispatching to 'count' command.");
            commands::count::run(args)
        }
        Commands::Elements(args) => {
            info!("Dispatching to 'elements' command.");
            commands::elements::run(args)
        }
        Commands::Compositions(args) => {
            info!("Dispatching to 'compositions' command.");
            commands::compositions::run(args)
        }
        Commands::Electronegativity(args) => {
            info!("Dispatching to 'electronegativity' command.");
            commands::electronegativity::run(args)
        }
    };

    match &command_result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }

    command_result
}
