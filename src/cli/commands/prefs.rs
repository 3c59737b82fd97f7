use crate::cli::parser::{Cli, Commands};
use crate::cli::session::{open_cloud, open_controller, render_options};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::PreferenceField;
use crate::models::preferences::parse_switch;
use crate::ui::messages::success;
use crate::ui::view::render;

/// Handle `set` and `toggle`
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cloud = open_cloud(cfg, None)?;
    let mut controller = open_controller(cloud, cfg);

    let field = match &cli.command {
        Commands::Set { field, value } => {
            let field = PreferenceField::from_code(field)?;
            controller.set_preference(field, parse_switch(value)?)?;
            field
        }
        Commands::Toggle { field } => {
            let field = PreferenceField::from_code(field)?;
            controller.toggle(field)?;
            field
        }
        _ => return Ok(()),
    };

    let (prefs, status) = controller.preferences().ok_or(AppError::NotSignedIn)?;
    success(format!(
        "{} → {} (sync: {})",
        field.label(),
        if prefs.get(field) { "on" } else { "off" },
        status
    ));
    print!("{}", render(&controller.screen(), &render_options(cli, cfg)));

    Ok(())
}
