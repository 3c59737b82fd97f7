use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use std::process::Command;

/// Editor for `config --edit`: `--editor`, then `$EDITOR` / `$VISUAL`.
fn pick_editor(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var("EDITOR").ok())
        .or_else(|| std::env::var("VISUAL").ok())
        .unwrap_or_else(|| if cfg!(windows) { "notepad" } else { "nano" }.to_string())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let path = Config::config_file();

    if *print_config {
        println!("📄 Current configuration ({}):\n", path.display());
        println!("{}", serde_yaml::to_string(cfg)?);
    }

    if *edit_config {
        let editor = pick_editor(editor.as_deref());
        let edited = Command::new(&editor)
            .arg(&path)
            .status()
            .is_ok_and(|s| s.success());
        if !edited {
            return Err(AppError::Config(format!(
                "editor '{}' failed on {}",
                editor,
                path.display()
            )));
        }
        success(format!("Configuration file edited with '{}'", editor));
    }

    Ok(())
}
