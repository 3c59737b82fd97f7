//! Colour helpers for terminal output.

use crate::models::SyncStatus;
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

/// Colour of the sync-status label.
pub fn color_for_sync_status(status: SyncStatus) -> Colour {
    match status {
        SyncStatus::Synced => Colour::Green,
        SyncStatus::Syncing => Colour::Yellow,
        SyncStatus::Error => Colour::Red,
    }
}

/// Colour of an operation in the internal log listing.
pub fn color_for_operation(op: &str) -> Colour {
    match op {
        "sign_in" => Colour::Green,
        "sign_out" => Colour::Red,
        "write" => Colour::Yellow,
        "subscribe" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // orange
        other if other.ends_with("_failed") => Colour::Red,
        _ => Colour::White,
    }
}

/// Paint `text` only when colours are enabled.
pub fn paint(colour: Colour, text: &str, enabled: bool) -> String {
    if enabled {
        colour.paint(text).to_string()
    } else {
        text.to_string()
    }
}

pub fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));
    re.replace_all(s, "").into_owned()
}
