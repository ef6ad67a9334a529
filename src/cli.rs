// src/cli.rs
use clap::{Parser, Subcommand};
use std::io::{self, Write}; // For stdout flush
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, StoreError};
use crate::generator::{self, GeneratorOptions};
use crate::models::RecordPatch;
use crate::settings::{self, Settings};
use crate::store::RecordStore;

/// A local credential manager that keeps site, email and password records
/// in a plain JSON file.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List stored entries, optionally filtered by a search term
    List {
        /// Sets the path to the record data file
        #[clap(short, long, value_parser, default_value = "password_data.json")]
        file: PathBuf,
        /// Case-insensitive search over site, email and notes
        #[clap(short, long)]
        search: Option<String>,
    },
    /// Add a new entry
    Add {
        /// Sets the path to the record data file
        #[clap(short, long, value_parser, default_value = "password_data.json")]
        file: PathBuf,
        site: String,
        email: String,
        /// Password for the entry; prompted on hidden input when omitted
        #[clap(short, long)]
        password: Option<String>,
        #[clap(short, long, default_value = "")]
        notes: String,
    },
    /// Update fields of an existing entry
    Update {
        /// Sets the path to the record data file
        #[clap(short, long, value_parser, default_value = "password_data.json")]
        file: PathBuf,
        id: u64,
        #[clap(long)]
        site: Option<String>,
        #[clap(long)]
        email: Option<String>,
        /// New password given inline (visible in shell history)
        #[clap(long, conflicts_with = "edit_password")]
        password: Option<String>,
        /// Prompt for a new password on hidden input
        #[clap(long)]
        edit_password: bool,
        #[clap(long)]
        notes: Option<String>,
    },
    /// Remove an entry by id
    Remove {
        /// Sets the path to the record data file
        #[clap(short, long, value_parser, default_value = "password_data.json")]
        file: PathBuf,
        id: u64,
        /// Skip the confirmation prompt
        #[clap(short, long)]
        yes: bool,
    },
    /// Generate a secure random password
    Generate {
        /// Password length; values outside 4..=50 are clamped
        #[clap(short, long, default_value_t = 12)]
        length: usize,
        /// Use letters and digits only
        #[clap(long)]
        no_symbols: bool,
    },
    /// Show or set the display theme
    Theme {
        /// Theme name to set; prints the current theme when omitted
        name: Option<String>,
        /// Sets the path to the settings file (defaults to the per-user
        /// config directory)
        #[clap(short, long)]
        config: Option<PathBuf>,
    },
}

/// Handles the parsed CLI command.
pub fn handle_cli_command(cli: Cli) -> AppResult<()> {
    log::debug!("Handling CLI command: {:?}", cli.command);
    match cli.command {
        Commands::List { file, search } => {
            log::info!("Executing 'list' command for file: {:?}", file);
            let store = open_store(&file);
            let entries = match search {
                Some(term) => store.filter(&term),
                None => store.records().to_vec(),
            };
            if entries.is_empty() {
                println!("No entries found.");
            } else {
                println!("Stored entries:");
                for record in &entries {
                    if record.notes.is_empty() {
                        println!("  [{}] {} - {}", record.id, record.site, record.email);
                    } else {
                        println!(
                            "  [{}] {} - {} ({})",
                            record.id, record.site, record.email, record.notes
                        );
                    }
                }
            }
            log::info!("Listed {} entries from {:?}.", entries.len(), file);
            Ok(())
        }
        Commands::Add { file, site, email, password, notes } => {
            log::info!("Executing 'add' command for file: {:?}", file);
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password for the new entry: ")?,
            };
            let mut store = open_store(&file);
            let record = store.add(&site, &email, &password, &notes)?;
            println!("Added entry {} for {} - {}.", record.id, record.site, record.email);
            Ok(())
        }
        Commands::Update { file, id, site, email, password, edit_password, notes } => {
            log::info!("Executing 'update' command for entry {} in {:?}", id, file);
            let password = if edit_password {
                Some(prompt_password("New password: ")?)
            } else {
                password
            };
            let mut store = open_store(&file);
            let patch = RecordPatch { site, email, password, notes };
            let record = store.update(id, patch)?;
            println!("Updated entry {}.", record.id);
            Ok(())
        }
        Commands::Remove { file, id, yes } => {
            log::info!("Executing 'remove' command for entry {} in {:?}", id, file);
            let mut store = open_store(&file);
            let site = match store.find(id) {
                Some(record) => record.site.clone(),
                None => return Err(StoreError::NotFound(id).into()),
            };
            if !yes {
                print!("Delete entry {} for site '{}'? (y/N): ", id, site);
                io::stdout().flush().map_err(|e| {
                    log::error!("Failed to flush stdout for delete confirmation: {}", e);
                    AppError::Cli(format!("Failed to flush stdout: {}", e))
                })?;
                let mut confirmation = String::new();
                io::stdin().read_line(&mut confirmation).map_err(|e| {
                    log::error!("Failed to read delete confirmation: {}", e);
                    AppError::Cli(format!("Failed to read confirmation: {}", e))
                })?;
                if confirmation.trim().to_lowercase() != "y" {
                    println!("Deletion cancelled.");
                    log::info!("Deletion of entry {} cancelled by user.", id);
                    return Ok(());
                }
            }
            store.delete(id)?;
            println!("Deleted entry {}.", id);
            Ok(())
        }
        Commands::Generate { length, no_symbols } => {
            let options = GeneratorOptions {
                length,
                include_symbols: !no_symbols,
            };
            let password = generator::generate_password(&options);
            log::info!("Generated a {}-character password.", password.len());
            println!("{}", password);
            Ok(())
        }
        Commands::Theme { name, config } => {
            let path = match config.or_else(settings::default_settings_path) {
                Some(p) => p,
                None => {
                    log::error!("Could not determine a settings directory on this platform.");
                    return Err(AppError::Settings(
                        "Could not determine a settings directory.".to_string(),
                    ));
                }
            };
            match name {
                Some(theme) => {
                    let new_settings = Settings { theme };
                    settings::save(&path, &new_settings).map_err(AppError::Settings)?;
                    println!("Theme set to '{}'.", new_settings.theme);
                }
                None => {
                    let current = settings::load(&path);
                    println!("Current theme: {}", current.theme);
                }
            }
            Ok(())
        }
    }
}

fn open_store(file: &Path) -> RecordStore {
    let mut store = RecordStore::open(file);
    store.subscribe(|| log::debug!("Record set changed."));
    store
}

fn prompt_password(prompt: &str) -> AppResult<String> {
    rpassword::prompt_password(prompt).map_err(|e| {
        log::error!("Failed to read password: {}", e);
        AppError::Cli(format!("Failed to read password: {}", e))
    })
}
