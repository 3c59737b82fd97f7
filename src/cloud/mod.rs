//! Contract with the external cloud sync service.
//!
//! Authentication, storage and subscription are owned by the collaborator;
//! the clock only consumes them through these traits. Two implementations
//! ship with the crate:
//!  - [`MemoryCloud`]: in-process and scriptable (remote pushes, failures)
//!  - [`LocalCloud`]: SQLite-backed, so separate `rclock` runs share state

pub mod local;
pub mod memory;

pub use local::LocalCloud;
pub use memory::MemoryCloud;

use crate::errors::AppResult;
use crate::models::{Identity, SubscriptionStatus, SyncStatus, Usage, User};
use serde_json::Value;

/// Value of a record as currently known by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSnapshot {
    /// `None` when nothing was ever written for this identity/key.
    pub value: Option<Value>,
    /// Monotonic per-record counter, bumped on every accepted write.
    pub revision: u64,
    pub status: SyncStatus,
}

/// Outcome of a write as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushReceipt {
    pub revision: u64,
    pub status: SyncStatus,
}

/// Auth surface.
pub trait AuthService {
    fn current_user(&self) -> Option<User>;

    fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }

    fn sign_in(&mut self) -> AppResult<User>;

    fn sign_out(&mut self) -> AppResult<()>;
}

/// Storage surface: eventually-consistent key/value records per identity.
///
/// `push` is fire-and-forget: failures are reported through the returned
/// status, never as an error.
pub trait RemoteStore {
    fn fetch(&mut self, identity: &Identity, key: &str) -> RemoteSnapshot;

    fn push(&mut self, identity: &Identity, key: &str, value: Value) -> PushReceipt;
}

/// Subscription surface.
pub trait SubscriptionService {
    fn usage(&self, identity: &Identity) -> Option<Usage>;

    fn subscription_status(&self, identity: &Identity) -> Option<SubscriptionStatus>;

    /// Whether a "manage subscription" action is offered.
    fn can_subscribe(&self, identity: &Identity) -> bool;

    fn subscribe(&mut self, identity: &Identity) -> AppResult<()>;
}

/// Everything the view controller needs from the collaborator.
pub trait CloudService: AuthService + RemoteStore + SubscriptionService {}

impl<T: AuthService + RemoteStore + SubscriptionService> CloudService for T {}
