use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of the single preferences record stored per identity.
pub const PREFERENCES_KEY: &str = "clock-preferences";

/// Display preferences of the clock.
///
/// The record is always handled as a whole: every change produces a new
/// record with one field replaced, so no half-applied state is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockPreferences {
    pub format24h: bool,
    pub show_seconds: bool,
    pub show_date: bool,
    pub last_viewed_at: i64, // ms since epoch, 0 = never
}

impl ClockPreferences {
    /// Default record created on first access for an identity.
    pub fn defaults(now_ms: i64) -> Self {
        Self {
            format24h: false,
            show_seconds: true,
            show_date: true,
            last_viewed_at: now_ms,
        }
    }

    /// Decode a stored value, falling back to the defaults when the value is
    /// missing or malformed.
    pub fn from_stored(value: Option<&Value>, now_ms: i64) -> Self {
        value
            .and_then(|v| serde_json::from_value::<Self>(v.clone()).ok())
            .unwrap_or_else(|| Self::defaults(now_ms))
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "format24h": self.format24h,
            "showSeconds": self.show_seconds,
            "showDate": self.show_date,
            "lastViewedAt": self.last_viewed_at,
        })
    }

    pub fn get(&self, field: PreferenceField) -> bool {
        match field {
            PreferenceField::Format24h => self.format24h,
            PreferenceField::ShowSeconds => self.show_seconds,
            PreferenceField::ShowDate => self.show_date,
        }
    }

    /// Copy of the record with a single boolean field replaced.
    pub fn with_field(self, field: PreferenceField, value: bool) -> Self {
        match field {
            PreferenceField::Format24h => Self {
                format24h: value,
                ..self
            },
            PreferenceField::ShowSeconds => Self {
                show_seconds: value,
                ..self
            },
            PreferenceField::ShowDate => Self {
                show_date: value,
                ..self
            },
        }
    }

    pub fn with_last_viewed(self, now_ms: i64) -> Self {
        Self {
            last_viewed_at: now_ms,
            ..self
        }
    }
}

/// User-editable boolean fields of [`ClockPreferences`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceField {
    Format24h,
    ShowSeconds,
    ShowDate,
}

impl PreferenceField {
    pub const ALL: [PreferenceField; 3] = [
        PreferenceField::Format24h,
        PreferenceField::ShowSeconds,
        PreferenceField::ShowDate,
    ];

    /// Checkbox label shown in the preferences card.
    pub fn label(&self) -> &'static str {
        match self {
            PreferenceField::Format24h => "24-hour format",
            PreferenceField::ShowSeconds => "Show seconds",
            PreferenceField::ShowDate => "Show date",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PreferenceField::Format24h => "format24h",
            PreferenceField::ShowSeconds => "seconds",
            PreferenceField::ShowDate => "date",
        }
    }

    /// Helper: convert CLI input (case-insensitive, a few aliases accepted)
    pub fn from_code(code: &str) -> AppResult<Self> {
        match code.to_lowercase().as_str() {
            "format24h" | "24h" | "24" => Ok(PreferenceField::Format24h),
            "seconds" | "showseconds" | "show-seconds" => Ok(PreferenceField::ShowSeconds),
            "date" | "showdate" | "show-date" => Ok(PreferenceField::ShowDate),
            other => Err(AppError::InvalidField(other.to_string())),
        }
    }
}

/// Parse an on/off switch as typed on the command line.
pub fn parse_switch(s: &str) -> AppResult<bool> {
    match s.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(AppError::InvalidToggle(other.to_string())),
    }
}
