use crate::cli::session::open_cloud;
use crate::cloud::AuthService;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `logout` command
///
/// Talks to the auth service directly: opening the clock view first would
/// count as a session open and stamp `lastViewedAt`.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let cloud = open_cloud(cfg, None)?;

    let Some(user) = cloud.borrow().current_user() else {
        info("Not signed in.");
        return Ok(());
    };

    cloud.borrow_mut().sign_out()?;
    success(format!("Signed out {}", user.email));
    Ok(())
}
