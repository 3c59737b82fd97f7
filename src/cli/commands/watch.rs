use crate::cli::parser::{Cli, Commands};
use crate::cli::session::{open_cloud, open_controller, render_options};
use crate::config::Config;
use crate::core::controller::ViewState;
use crate::errors::AppResult;
use crate::ui::messages::clear_screen;
use crate::ui::view::render;
use std::io::{self, Write};

/// Handle the `watch` command: the live clock loop
///
/// Each iteration blocks until the next tick, pulls changes made by other
/// sessions and redraws. Signed out (at start or while running) → the
/// sign-in screen is drawn once.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { ticks, no_clear } = &cli.command {
        let opts = render_options(cli, cfg);
        let cloud = open_cloud(cfg, None)?;
        let mut controller = open_controller(cloud, cfg);

        if controller.state() == ViewState::SignedOut {
            print!("{}", render(&controller.screen(), &opts));
            return Ok(());
        }

        let mut frames: u64 = 0;
        loop {
            if !*no_clear {
                clear_screen();
            }
            print!("{}", render(&controller.screen(), &opts));
            io::stdout().flush()?;

            frames += 1;
            if ticks.is_some_and(|max| frames >= max) {
                break;
            }
            if controller.tick().is_none() {
                break;
            }
        }

        // signed out from another terminal
        if controller.state() == ViewState::SignedOut {
            if !*no_clear {
                clear_screen();
            }
            print!("{}", render(&controller.screen(), &opts));
        }
    }

    Ok(())
}
