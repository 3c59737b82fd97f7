pub mod account;
pub mod preferences;
pub mod sync_status;

pub use account::{Identity, Plan, SubscriptionStatus, Usage, User};
pub use preferences::{ClockPreferences, PreferenceField};
pub use sync_status::SyncStatus;
