//! Row-level access to the local cloud tables.

use crate::models::{Identity, Plan, SubscriptionStatus, Usage, User};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, params};
use serde_json::Value;

/// A stored record row.
#[derive(Debug, Clone)]
pub struct RecordRow {
    pub value: String,
    pub revision: u64,
}

/// Account row for an identity.
#[derive(Debug, Clone, Default)]
pub struct AccountRow {
    pub plan: Option<String>,
    pub status: Option<String>,
    pub remaining_credits: i64,
}

impl AccountRow {
    pub fn usage(&self) -> Usage {
        Usage {
            remaining_credits: self.remaining_credits,
        }
    }

    pub fn subscription(&self) -> Option<SubscriptionStatus> {
        match (&self.plan, &self.status) {
            (Some(plan), Some(status)) => Some(SubscriptionStatus {
                plan: Plan { name: plan.clone() },
                status: status.clone(),
            }),
            _ => None,
        }
    }
}

// ---------------------------
// Session
// ---------------------------

pub fn load_session(conn: &Connection) -> Result<Option<User>> {
    conn.query_row(
        "SELECT email, avatar_url FROM session WHERE id = 1",
        [],
        |row| {
            Ok(User {
                email: row.get(0)?,
                avatar_url: row.get(1)?,
            })
        },
    )
    .optional()
}

pub fn save_session(conn: &Connection, user: &User) -> Result<()> {
    conn.execute(
        "INSERT INTO session (id, email, avatar_url, signed_in_at)
         VALUES (1, ?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
            email = excluded.email,
            avatar_url = excluded.avatar_url,
            signed_in_at = excluded.signed_in_at",
        params![user.email, user.avatar_url, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn clear_session(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM session", [])
}

// ---------------------------
// Records
// ---------------------------

pub fn load_record(conn: &Connection, identity: &Identity, key: &str) -> Result<Option<RecordRow>> {
    conn.query_row(
        "SELECT value, revision FROM records WHERE identity = ?1 AND key = ?2",
        params![identity.as_str(), key],
        |row| {
            Ok(RecordRow {
                value: row.get(0)?,
                revision: row.get::<_, i64>(1)? as u64,
            })
        },
    )
    .optional()
}

/// Replace the stored value, bumping the revision. Returns the new revision.
pub fn upsert_record(
    conn: &Connection,
    identity: &Identity,
    key: &str,
    value: &Value,
) -> Result<u64> {
    conn.execute(
        "INSERT INTO records (identity, key, value, revision, updated_at)
         VALUES (?1, ?2, ?3, 1, ?4)
         ON CONFLICT(identity, key) DO UPDATE SET
            value = excluded.value,
            revision = records.revision + 1,
            updated_at = excluded.updated_at",
        params![
            identity.as_str(),
            key,
            value.to_string(),
            Local::now().to_rfc3339()
        ],
    )?;

    let revision: i64 = conn.query_row(
        "SELECT revision FROM records WHERE identity = ?1 AND key = ?2",
        params![identity.as_str(), key],
        |row| row.get(0),
    )?;
    Ok(revision as u64)
}

// ---------------------------
// Accounts
// ---------------------------

pub fn load_account(conn: &Connection, identity: &Identity) -> Result<Option<AccountRow>> {
    conn.query_row(
        "SELECT plan, status, remaining_credits FROM accounts WHERE identity = ?1",
        [identity.as_str()],
        |row| {
            Ok(AccountRow {
                plan: row.get(0)?,
                status: row.get(1)?,
                remaining_credits: row.get(2)?,
            })
        },
    )
    .optional()
}

pub fn ensure_account(conn: &Connection, identity: &Identity, starting_credits: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO accounts (identity, plan, status, remaining_credits)
         VALUES (?1, NULL, NULL, ?2)",
        params![identity.as_str(), starting_credits],
    )?;
    Ok(())
}

pub fn set_plan(conn: &Connection, identity: &Identity, plan: &str, status: &str) -> Result<()> {
    conn.execute(
        "UPDATE accounts SET plan = ?2, status = ?3 WHERE identity = ?1",
        params![identity.as_str(), plan, status],
    )?;
    Ok(())
}
