//! SQLite-backed stand-in for the cloud service.
//!
//! Every `rclock` run opens the same database, so a second terminal behaves
//! like a second session of the same identity: its writes show up as remote
//! updates in the first one.

use super::{AuthService, PushReceipt, RemoteSnapshot, RemoteStore, SubscriptionService};
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{Identity, SubscriptionStatus, SyncStatus, Usage, User};
use rusqlite::Connection;
use serde_json::Value;
use std::collections::HashMap;

/// Credits granted to an identity on its first sign-in.
pub const STARTING_CREDITS: i64 = 100;

pub struct LocalCloud {
    pool: DbPool,
    login_as: Option<User>,
    /// Records whose last push from this handle was rejected, with the
    /// revision they had at that point.
    failed: HashMap<(Identity, String), u64>,
}

impl LocalCloud {
    /// Open (and migrate) the database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self {
            pool,
            login_as: None,
            failed: HashMap::new(),
        })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self {
            pool,
            login_as: None,
            failed: HashMap::new(),
        })
    }

    /// Account used by the next `sign_in`.
    pub fn with_login(mut self, user: Option<User>) -> Self {
        self.login_as = user;
        self
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    /// `error` while the last rejected push is still the latest word on the
    /// record; a newer revision from any session supersedes it.
    fn record_status(&mut self, identity: &Identity, key: &str, revision: u64) -> SyncStatus {
        let k = (identity.clone(), key.to_string());
        match self.failed.get(&k).copied() {
            Some(at) if at == revision => SyncStatus::Error,
            Some(_) => {
                self.failed.remove(&k);
                SyncStatus::Synced
            }
            None => SyncStatus::Synced,
        }
    }
}

impl AuthService for LocalCloud {
    fn current_user(&self) -> Option<User> {
        queries::load_session(&self.pool.conn).ok().flatten()
    }

    fn sign_in(&mut self) -> AppResult<User> {
        let user = self
            .login_as
            .clone()
            .or_else(|| self.current_user())
            .ok_or_else(|| {
                AppError::Auth("no account to sign in with (use --email or set default_email)".into())
            })?;

        if user.email.trim().is_empty() {
            return Err(AppError::Auth("email must not be empty".into()));
        }

        let identity = user.identity();
        self.pool.with_conn(|conn| {
            queries::save_session(conn, &user)?;
            queries::ensure_account(conn, &identity, STARTING_CREDITS)
        })?;
        ttlog_quiet(&self.pool.conn, "sign_in", identity.as_str(), "Signed in");

        Ok(user)
    }

    fn sign_out(&mut self) -> AppResult<()> {
        let target = self
            .current_user()
            .map(|u| u.identity().to_string())
            .unwrap_or_default();
        queries::clear_session(&self.pool.conn)?;
        ttlog_quiet(&self.pool.conn, "sign_out", &target, "Signed out");
        Ok(())
    }
}

impl RemoteStore for LocalCloud {
    fn fetch(&mut self, identity: &Identity, key: &str) -> RemoteSnapshot {
        match queries::load_record(&self.pool.conn, identity, key) {
            Ok(Some(row)) => RemoteSnapshot {
                // undecodable text is handed over as "no value"
                value: serde_json::from_str(&row.value).ok(),
                revision: row.revision,
                status: self.record_status(identity, key, row.revision),
            },
            Ok(None) => RemoteSnapshot {
                value: None,
                revision: 0,
                status: self.record_status(identity, key, 0),
            },
            Err(e) => {
                ttlog_quiet(&self.pool.conn, "fetch_failed", key, &e.to_string());
                RemoteSnapshot {
                    value: None,
                    revision: 0,
                    status: SyncStatus::Error,
                }
            }
        }
    }

    fn push(&mut self, identity: &Identity, key: &str, value: Value) -> PushReceipt {
        match queries::upsert_record(&self.pool.conn, identity, key, &value) {
            Ok(revision) => {
                self.failed.remove(&(identity.clone(), key.to_string()));
                ttlog_quiet(
                    &self.pool.conn,
                    "write",
                    key,
                    &format!("{} rev {}", identity, revision),
                );
                PushReceipt {
                    revision,
                    status: SyncStatus::Synced,
                }
            }
            Err(e) => {
                ttlog_quiet(&self.pool.conn, "write_failed", key, &e.to_string());
                let revision = queries::load_record(&self.pool.conn, identity, key)
                    .ok()
                    .flatten()
                    .map(|r| r.revision)
                    .unwrap_or(0);
                self.failed
                    .insert((identity.clone(), key.to_string()), revision);
                PushReceipt {
                    revision,
                    status: SyncStatus::Error,
                }
            }
        }
    }
}

impl SubscriptionService for LocalCloud {
    fn usage(&self, identity: &Identity) -> Option<Usage> {
        queries::load_account(&self.pool.conn, identity)
            .ok()
            .flatten()
            .map(|a| a.usage())
    }

    fn subscription_status(&self, identity: &Identity) -> Option<SubscriptionStatus> {
        queries::load_account(&self.pool.conn, identity)
            .ok()
            .flatten()
            .and_then(|a| a.subscription())
    }

    fn can_subscribe(&self, identity: &Identity) -> bool {
        matches!(queries::load_account(&self.pool.conn, identity), Ok(Some(_)))
    }

    fn subscribe(&mut self, identity: &Identity) -> AppResult<()> {
        if !self.can_subscribe(identity) {
            return Err(AppError::Subscription(format!(
                "no account found for {}",
                identity
            )));
        }
        queries::set_plan(&self.pool.conn, identity, "Pro", "active")?;
        ttlog_quiet(
            &self.pool.conn,
            "subscribe",
            identity.as_str(),
            "Subscription set to Pro (active)",
        );
        Ok(())
    }
}
