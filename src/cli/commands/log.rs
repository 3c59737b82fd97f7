use crate::cli::parser::{Cli, Commands};
use crate::cli::session::render_options;
use crate::cloud::LocalCloud;
use crate::config::Config;
use crate::errors::AppResult;
use crate::utils::colors::{color_for_operation, paint};
use rusqlite::Connection;

/// Handle the `log` command
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if matches!(cli.command, Commands::Log { print: true }) {
        let cloud = LocalCloud::open(&cfg.database)?;
        print_log(cloud.conn(), render_options(cli, cfg).color)?;
    }

    Ok(())
}

struct LogEntry {
    id: i64,
    date: String,
    operation: String,
    target: String,
    message: String,
}

/// Print the internal log, oldest first, with the operation coloured.
pub fn print_log(conn: &Connection, color: bool) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let raw_date: String = row.get(1)?;
        let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or(raw_date);

        Ok(LogEntry {
            id: row.get(0)?,
            date,
            operation: row.get(2)?,
            target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            message: row.get(4)?,
        })
    })?;

    let entries = rows.collect::<Result<Vec<_>, _>>()?;

    if entries.is_empty() {
        println!("📜 Internal log is empty.");
        return Ok(());
    }

    let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
    let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);
    let op_w = entries
        .iter()
        .map(|e| op_target(e).chars().count())
        .max()
        .unwrap_or(10)
        .min(60);

    println!("📜 Internal log:\n");

    for e in &entries {
        let mut visible = op_target(e);
        if visible.chars().count() > 60 {
            visible = visible.chars().take(57).collect::<String>() + "...";
        }
        let padding = " ".repeat(op_w.saturating_sub(visible.chars().count()));

        // only the operation word is coloured
        let shown = match visible.split_once(' ') {
            Some((op, rest)) => format!(
                "{} {}",
                paint(color_for_operation(&e.operation), op, color),
                rest
            ),
            None => paint(color_for_operation(&e.operation), &visible, color),
        };

        println!(
            "{:>id_w$}: {:<date_w$} | {}{} => {}",
            e.id,
            e.date,
            shown,
            padding,
            e.message,
            id_w = id_w,
            date_w = date_w
        );
    }

    Ok(())
}

fn op_target(e: &LogEntry) -> String {
    if e.target.is_empty() {
        e.operation.clone()
    } else {
        format!("{} ({})", e.operation, e.target)
    }
}
