use crate::cli::parser::Cli;
use crate::cli::session::{open_cloud, open_controller, render_options};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::ui::view::render;

/// Handle the `subscribe` command ("Manage Subscription")
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cloud = open_cloud(cfg, None)?;
    let mut controller = open_controller(cloud, cfg);

    if controller.manage_subscription()? {
        success("Subscription updated.");
    } else {
        warning("Subscription management is not available for this account.");
    }
    print!("{}", render(&controller.screen(), &render_options(cli, cfg)));

    Ok(())
}
