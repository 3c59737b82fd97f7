use crate::cli::parser::Cli;
use crate::cli::session::{open_cloud, open_controller, render_options};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::view::render;

/// Handle the `show` command: draw the current screen once
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cloud = open_cloud(cfg, None)?;
    let controller = open_controller(cloud, cfg);

    print!("{}", render(&controller.screen(), &render_options(cli, cfg)));
    Ok(())
}
