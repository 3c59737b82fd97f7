//! Screen models produced by the view controller and drawn by `ui::view`.

use crate::core::format::{format_date_at, format_last_viewed, format_time_at};
use crate::models::{ClockPreferences, SubscriptionStatus, SyncStatus, Usage, User};

/// What the clock face currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    pub prefs: ClockPreferences,
    pub status: SyncStatus,
    /// Timestamp of the last tick, `None` before the first one.
    pub now_ms: Option<i64>,
    pub time: String,
    pub date: Option<String>,
}

impl ClockFace {
    pub fn new(prefs: ClockPreferences, status: SyncStatus) -> Self {
        Self {
            prefs,
            status,
            now_ms: None,
            time: String::new(),
            date: None,
        }
    }

    pub fn apply_prefs(&mut self, prefs: ClockPreferences, status: SyncStatus) {
        self.prefs = prefs;
        self.status = status;
        self.redraw();
    }

    pub fn apply_tick(&mut self, now_ms: i64) {
        self.now_ms = Some(now_ms);
        self.redraw();
    }

    pub fn last_viewed(&self) -> String {
        format_last_viewed(self.prefs.last_viewed_at)
    }

    fn redraw(&mut self) {
        if let Some(ms) = self.now_ms {
            self.time = format_time_at(ms, &self.prefs);
            self.date = self.prefs.show_date.then(|| format_date_at(ms));
        }
    }
}

/// Account card content. Missing collaborator data falls back to
/// plan `Free`, status `none` and zero credits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetails {
    pub plan: String,
    pub status: String,
    pub remaining_credits: i64,
    pub can_manage: bool,
}

impl AccountDetails {
    pub fn new(
        usage: Option<Usage>,
        subscription: Option<SubscriptionStatus>,
        can_manage: bool,
    ) -> Self {
        let (plan, status) = match subscription {
            Some(s) => (s.plan.name, s.status),
            None => ("Free".to_string(), "none".to_string()),
        };
        Self {
            plan,
            status,
            remaining_credits: usage.map(|u| u.remaining_credits).unwrap_or(0),
            can_manage,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClockScreen {
    pub user: User,
    pub face: ClockFace,
    pub account: AccountDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    SignIn,
    Clock(ClockScreen),
}
