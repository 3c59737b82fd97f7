//! In-process cloud service used by tests and demos.
//!
//! Everything is kept in memory and can be scripted: which user a sign-in
//! yields, how writes settle, and pushes coming from "another session".

use super::{AuthService, PushReceipt, RemoteSnapshot, RemoteStore, SubscriptionService};
use crate::errors::{AppError, AppResult};
use crate::models::{Identity, Plan, SubscriptionStatus, SyncStatus, Usage, User};
use serde_json::Value;
use std::collections::HashMap;

/// How the store reacts to a local `push`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Accepted and reported `synced` straight away.
    #[default]
    Immediate,
    /// Accepted but reported `syncing` until [`MemoryCloud::settle`].
    Deferred,
    /// Rejected: the remote copy is untouched and the status becomes `error`.
    Failing,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    value: Value,
    revision: u64,
}

/// A write issued through [`RemoteStore::push`].
#[derive(Debug, Clone, PartialEq)]
pub struct PushedWrite {
    pub identity: Identity,
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Default)]
pub struct MemoryCloud {
    session: Option<User>,
    login_as: Option<User>,
    auth_failure: Option<String>,
    records: HashMap<(Identity, String), StoredRecord>,
    status: HashMap<(Identity, String), SyncStatus>,
    write_mode: WriteMode,
    pushes: Vec<PushedWrite>,
    usage: HashMap<Identity, Usage>,
    subscriptions: HashMap<Identity, SubscriptionStatus>,
    subscribe_offered: bool,
}

impl MemoryCloud {
    pub fn new() -> Self {
        Self {
            subscribe_offered: true,
            ..Self::default()
        }
    }

    /// Service with `user` already signed in.
    pub fn signed_in(user: User) -> Self {
        let mut cloud = Self::new();
        cloud.session = Some(user.clone());
        cloud.login_as = Some(user);
        cloud
    }

    /// User returned by the next `sign_in`.
    pub fn set_login(&mut self, user: User) {
        self.login_as = Some(user);
    }

    /// Make every subsequent `sign_in` fail with `reason`.
    pub fn fail_sign_in(&mut self, reason: impl Into<String>) {
        self.auth_failure = Some(reason.into());
    }

    pub fn set_write_mode(&mut self, mode: WriteMode) {
        self.write_mode = mode;
    }

    /// Mark every pending (`syncing`) record as converged.
    pub fn settle(&mut self) {
        for status in self.status.values_mut() {
            if *status == SyncStatus::Syncing {
                *status = SyncStatus::Synced;
            }
        }
    }

    /// Simulate a write made by another session of the same identity.
    pub fn push_remote(&mut self, identity: &Identity, key: &str, value: Value) {
        self.store(identity, key, value);
        self.status
            .insert((identity.clone(), key.to_string()), SyncStatus::Synced);
    }

    /// Raw value currently held remotely.
    pub fn stored(&self, identity: &Identity, key: &str) -> Option<&Value> {
        self.records
            .get(&(identity.clone(), key.to_string()))
            .map(|r| &r.value)
    }

    /// Local writes received so far, in arrival order.
    pub fn pushes(&self) -> &[PushedWrite] {
        &self.pushes
    }

    pub fn set_usage(&mut self, identity: &Identity, remaining_credits: i64) {
        self.usage
            .insert(identity.clone(), Usage { remaining_credits });
    }

    pub fn set_subscription(&mut self, identity: &Identity, plan: &str, status: &str) {
        self.subscriptions.insert(
            identity.clone(),
            SubscriptionStatus {
                plan: Plan {
                    name: plan.to_string(),
                },
                status: status.to_string(),
            },
        );
    }

    pub fn offer_subscribe(&mut self, offered: bool) {
        self.subscribe_offered = offered;
    }

    fn store(&mut self, identity: &Identity, key: &str, value: Value) -> u64 {
        let entry = self
            .records
            .entry((identity.clone(), key.to_string()))
            .or_insert(StoredRecord {
                value: Value::Null,
                revision: 0,
            });
        entry.value = value;
        entry.revision += 1;
        entry.revision
    }

    fn revision(&self, identity: &Identity, key: &str) -> u64 {
        self.records
            .get(&(identity.clone(), key.to_string()))
            .map(|r| r.revision)
            .unwrap_or(0)
    }
}

impl AuthService for MemoryCloud {
    fn current_user(&self) -> Option<User> {
        self.session.clone()
    }

    fn sign_in(&mut self) -> AppResult<User> {
        if let Some(reason) = &self.auth_failure {
            return Err(AppError::Auth(reason.clone()));
        }
        let user = self
            .login_as
            .clone()
            .ok_or_else(|| AppError::Auth("no account available for sign-in".into()))?;
        self.session = Some(user.clone());
        Ok(user)
    }

    fn sign_out(&mut self) -> AppResult<()> {
        self.session = None;
        Ok(())
    }
}

impl RemoteStore for MemoryCloud {
    fn fetch(&mut self, identity: &Identity, key: &str) -> RemoteSnapshot {
        let k = (identity.clone(), key.to_string());
        RemoteSnapshot {
            value: self.records.get(&k).map(|r| r.value.clone()),
            revision: self.revision(identity, key),
            status: self.status.get(&k).copied().unwrap_or(SyncStatus::Synced),
        }
    }

    fn push(&mut self, identity: &Identity, key: &str, value: Value) -> PushReceipt {
        self.pushes.push(PushedWrite {
            identity: identity.clone(),
            key: key.to_string(),
            value: value.clone(),
        });

        let (revision, status) = match self.write_mode {
            WriteMode::Immediate => (self.store(identity, key, value), SyncStatus::Synced),
            WriteMode::Deferred => (self.store(identity, key, value), SyncStatus::Syncing),
            WriteMode::Failing => (self.revision(identity, key), SyncStatus::Error),
        };
        self.status
            .insert((identity.clone(), key.to_string()), status);

        PushReceipt { revision, status }
    }
}

impl SubscriptionService for MemoryCloud {
    fn usage(&self, identity: &Identity) -> Option<Usage> {
        self.usage.get(identity).cloned()
    }

    fn subscription_status(&self, identity: &Identity) -> Option<SubscriptionStatus> {
        self.subscriptions.get(identity).cloned()
    }

    fn can_subscribe(&self, _identity: &Identity) -> bool {
        self.subscribe_offered
    }

    fn subscribe(&mut self, identity: &Identity) -> AppResult<()> {
        if !self.subscribe_offered {
            return Err(AppError::Subscription(
                "subscriptions are not available".into(),
            ));
        }
        self.set_subscription(identity, "Pro", "active");
        Ok(())
    }
}
