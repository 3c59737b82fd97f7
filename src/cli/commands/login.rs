use crate::cli::parser::{Cli, Commands};
use crate::cli::session::{open_cloud, open_controller, render_options};
use crate::cloud::AuthService;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::ui::messages::{info, success};
use crate::ui::view::render;

/// Handle the `login` command
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Login { email, avatar } = &cli.command {
        let email = email
            .clone()
            .or_else(|| cfg.default_email.clone())
            .ok_or_else(|| AppError::Auth("no email given (use --email or set default_email)".into()))?;

        let mut user = User::new(email);
        if let Some(url) = avatar {
            user = user.with_avatar(url.clone());
        }

        let cloud = open_cloud(cfg, Some(user.clone()))?;

        let current = cloud.borrow().current_user();
        match current {
            Some(u) if u.identity() == user.identity() && u.avatar_url == user.avatar_url => {
                info(format!("Already signed in as {}", u.email));
                return Ok(());
            }
            Some(u) => {
                info(format!("Switching account: signing out {}", u.email));
                cloud.borrow_mut().sign_out()?;
            }
            None => {}
        }

        let mut controller = open_controller(cloud, cfg);
        controller.sign_in()?;

        success(format!("Signed in as {}", user.email));
        println!("{}", render(&controller.screen(), &render_options(cli, cfg)));
    }

    Ok(())
}
