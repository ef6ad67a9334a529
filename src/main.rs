// src/main.rs
mod cli;
mod codec;
mod error;
mod generator;
mod models;
mod notifier;
mod settings;
mod store;

use clap::Parser;

fn main() -> Result<(), error::AppError> {
    env_logger::init();
    log::info!("Starting credman-rs");

    let cli_args = cli::Cli::parse();

    if let Err(e) = cli::handle_cli_command(cli_args) {
        // Specific error context is logged closer to the source.
        log::error!("Command failed: {:#?}", e);
        eprintln!("Error: {}", e);
        return Err(e);
    }

    log::info!("credman-rs finished successfully.");
    Ok(())
}
