//! rClock library root.
//! Exposes the CLI parser, the high-level run() function and the clock
//! components (formatter, time source, preference store, view controller).

pub mod cli;
pub mod cloud;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Login { .. } => cli::commands::login::handle(cli, cfg),
        Commands::Logout => cli::commands::logout::handle(cfg),
        Commands::Show => cli::commands::show::handle(cli, cfg),
        Commands::Watch { .. } => cli::commands::watch::handle(cli, cfg),
        Commands::Set { .. } | Commands::Toggle { .. } => cli::commands::prefs::handle(cli, cfg),
        Commands::Subscribe => cli::commands::subscribe::handle(cli, cfg),
        Commands::Log { .. } => cli::commands::log::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once, then the command-line overrides are applied
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
