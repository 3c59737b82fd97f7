//! Text rendering of the two screens.

use crate::core::screen::{AccountDetails, ClockFace, ClockScreen, Screen};
use crate::models::PreferenceField;
use crate::utils::colors::{color_for_sync_status, paint};
use ansi_term::{Colour, Style};
use unicode_width::UnicodeWidthStr;

pub const APP_TITLE: &str = "Digital Clock";
const DESCRIPTION: &str =
    "A beautiful digital clock with customizable preferences, powered by AI";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub color: bool,
    /// Inner width of the cards, in terminal columns.
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            width: 44,
        }
    }
}

pub fn render(screen: &Screen, opts: &RenderOptions) -> String {
    match screen {
        Screen::SignIn => render_sign_in(opts),
        Screen::Clock(clock) => render_clock(clock, opts),
    }
}

pub fn render_sign_in(opts: &RenderOptions) -> String {
    let inner = opts.width.saturating_sub(2);
    let mut lines = vec![center(&bold(APP_TITLE, opts.color), inner), String::new()];
    for l in textwrap::wrap(DESCRIPTION, inner.max(10)) {
        lines.push(center(&l, inner));
    }
    lines.push(String::new());
    lines.push(center("[ Sign In ]  →  rclock login", inner));

    card(None, &lines, opts.width)
}

pub fn render_clock(screen: &ClockScreen, opts: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&header(screen, opts));
    out.push('\n');
    out.push_str(&clock_display(&screen.face, opts));
    out.push('\n');
    out.push_str(&preferences_card(&screen.face, opts));
    out.push('\n');
    out.push_str(&account_card(&screen.account, opts));

    out
}

fn header(screen: &ClockScreen, opts: &RenderOptions) -> String {
    let mut user = screen.user.email.clone();
    if let Some(avatar) = &screen.user.avatar_url {
        user = format!("{} ({})", user, avatar);
    }
    let title = bold(APP_TITLE, opts.color);
    let gap = (opts.width + 2)
        .saturating_sub(APP_TITLE.width() + user.width() + " [Sign Out]".width())
        .max(2);

    format!(
        "{}{}{} [Sign Out]\n{}\n",
        title,
        " ".repeat(gap),
        user,
        "─".repeat(opts.width + 2)
    )
}

fn clock_display(face: &ClockFace, opts: &RenderOptions) -> String {
    let time = if opts.color {
        Style::new().bold().fg(Colour::Cyan).paint(&face.time).to_string()
    } else {
        face.time.clone()
    };

    let mut out = center(&time, opts.width + 2);
    out.push('\n');
    if let Some(date) = &face.date {
        out.push_str(&center(date, opts.width + 2));
        out.push('\n');
    }
    out
}

fn preferences_card(face: &ClockFace, opts: &RenderOptions) -> String {
    let mut lines: Vec<String> = PreferenceField::ALL
        .iter()
        .map(|f| {
            let mark = if face.prefs.get(*f) { "x" } else { " " };
            format!("[{}] {}", mark, f.label())
        })
        .collect();

    lines.push(String::new());
    lines.push(format!(
        "Sync status: {}",
        paint(
            color_for_sync_status(face.status),
            face.status.as_str(),
            opts.color
        )
    ));
    lines.push(format!("Last viewed: {}", face.last_viewed()));

    card(Some("Clock Preferences"), &lines, opts.width)
}

fn account_card(account: &AccountDetails, opts: &RenderOptions) -> String {
    let mut lines = vec![
        format!("Plan:    {}", account.plan),
        format!("Status:  {}", account.status),
        format!("Credits: {} remaining", account.remaining_credits),
    ];
    if account.can_manage {
        lines.push(String::new());
        lines.push("[ Manage Subscription ]  →  rclock subscribe".to_string());
    }

    card(Some("Account Details"), &lines, opts.width)
}

/// Box `lines` in a rounded frame. Width is measured without ANSI codes.
fn card(title: Option<&str>, lines: &[String], width: usize) -> String {
    let top = match title {
        Some(t) => {
            let label = format!("─ {} ", t);
            format!(
                "╭{}{}╮",
                label,
                "─".repeat(width.saturating_sub(label.width()))
            )
        }
        None => format!("╭{}╮", "─".repeat(width)),
    };

    let mut out = top;
    out.push('\n');
    for l in lines {
        out.push_str(&format!("│ {} │\n", pad(l, width.saturating_sub(2))));
    }
    out.push_str(&format!("╰{}╯\n", "─".repeat(width)));
    out
}

fn visible_width(s: &str) -> usize {
    crate::utils::colors::strip_ansi(s).width()
}

fn pad(s: &str, width: usize) -> String {
    let w = visible_width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

fn center(s: &str, width: usize) -> String {
    let w = visible_width(s);
    let left = width.saturating_sub(w) / 2;
    let right = width.saturating_sub(w + left);
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

fn bold(s: &str, enabled: bool) -> String {
    if enabled {
        Style::new().bold().paint(s).to_string()
    } else {
        s.to_string()
    }
}
