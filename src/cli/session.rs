//! Wiring shared by the commands: local cloud + system clock + controller.

use crate::cli::parser::Cli;
use crate::cloud::LocalCloud;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::controller::ViewController;
use crate::errors::AppResult;
use crate::models::User;
use crate::ui::view::RenderOptions;
use std::cell::RefCell;
use std::rc::Rc;

pub type Controller = ViewController<LocalCloud, SystemClock>;

pub fn open_cloud(cfg: &Config, login: Option<User>) -> AppResult<Rc<RefCell<LocalCloud>>> {
    let cloud = LocalCloud::open(&cfg.database)?.with_login(login);
    Ok(Rc::new(RefCell::new(cloud)))
}

pub fn open_controller(cloud: Rc<RefCell<LocalCloud>>, cfg: &Config) -> Controller {
    ViewController::open(cloud, Rc::new(SystemClock::new()), cfg.tick_interval())
}

pub fn render_options(cli: &Cli, cfg: &Config) -> RenderOptions {
    RenderOptions {
        color: cfg.use_colors && !cli.no_color,
        ..RenderOptions::default()
    }
}
