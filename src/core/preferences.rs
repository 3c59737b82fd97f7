//! Preference store adapter.
//!
//! Read-through, write-through cache of the `clock-preferences` record for one
//! identity. Writes are pushed in issue order and never fail locally: the
//! outcome is reported through [`SyncStatus`]. Remote changes are pulled with
//! [`PreferenceStore::refresh`] and win over the cached copy (last-write-wins,
//! no merge). A partial update is a read-modify-write against the last known
//! record, so a remote edit landing between the read and the push is lost.

use crate::cloud::RemoteStore;
use crate::core::clock::Clock;
use crate::models::preferences::PREFERENCES_KEY;
use crate::models::{ClockPreferences, Identity, PreferenceField, SyncStatus};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback = Box<dyn FnMut(&ClockPreferences, SyncStatus)>;

struct Subscriber {
    active: Rc<Cell<bool>>,
    callback: Callback,
}

type Subscribers = Rc<RefCell<Vec<Subscriber>>>;

/// Handle returned by [`PreferenceStore::on_change`].
/// Dropping it (or calling [`Subscription::cancel`]) unsubscribes.
pub struct Subscription {
    active: Rc<Cell<bool>>,
    list: Weak<RefCell<Vec<Subscriber>>>,
}

impl Subscription {
    pub fn cancel(self) {}

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.set(false);
        // While a notification is running the list is borrowed; the entry is
        // then skipped and purged at the end of that notification.
        if let Some(list) = self.list.upgrade()
            && let Ok(mut subs) = list.try_borrow_mut()
        {
            subs.retain(|s| s.active.get());
        }
    }
}

pub struct PreferenceStore<S: RemoteStore> {
    service: Rc<RefCell<S>>,
    clock: Rc<dyn Clock>,
    identity: Identity,
    record: ClockPreferences,
    status: SyncStatus,
    revision: u64,
    subscribers: Subscribers,
}

impl<S: RemoteStore> PreferenceStore<S> {
    /// Load the record for `identity`. When nothing is stored yet the default
    /// record is returned and pushed to create it.
    pub fn open(service: Rc<RefCell<S>>, identity: Identity, clock: Rc<dyn Clock>) -> Self {
        let (mut store, exists) = Self::load(service, identity, clock);
        if !exists {
            let record = store.record;
            store.write(record);
        }
        store
    }

    /// Load the record and stamp `lastViewedAt` with the current time.
    ///
    /// Issues exactly one write, which also creates the record when missing.
    pub fn open_session(service: Rc<RefCell<S>>, identity: Identity, clock: Rc<dyn Clock>) -> Self {
        let (mut store, _) = Self::load(service, identity, clock);
        store.touch_last_viewed();
        store
    }

    fn load(service: Rc<RefCell<S>>, identity: Identity, clock: Rc<dyn Clock>) -> (Self, bool) {
        let snapshot = service.borrow_mut().fetch(&identity, PREFERENCES_KEY);
        let exists = snapshot.value.is_some() || snapshot.status == SyncStatus::Error;
        let record = ClockPreferences::from_stored(snapshot.value.as_ref(), clock.now_millis());

        let store = Self {
            service,
            clock,
            identity,
            record,
            status: snapshot.status,
            revision: snapshot.revision,
            subscribers: Rc::new(RefCell::new(Vec::new())),
        };
        (store, exists)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Current known value and sync state.
    pub fn read(&self) -> (ClockPreferences, SyncStatus) {
        (self.record, self.status)
    }

    pub fn record(&self) -> ClockPreferences {
        self.record
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    /// Replace the whole record. Fire-and-forget: the store's verdict only
    /// shows up in the sync status.
    pub fn write(&mut self, record: ClockPreferences) {
        let receipt = self
            .service
            .borrow_mut()
            .push(&self.identity, PREFERENCES_KEY, record.to_value());
        self.revision = receipt.revision;
        self.set_state(record, receipt.status);
    }

    /// Read-modify-write against the last known record.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(ClockPreferences) -> ClockPreferences,
    {
        let next = f(self.record);
        self.write(next);
    }

    pub fn set_field(&mut self, field: PreferenceField, value: bool) {
        self.update(|p| p.with_field(field, value));
    }

    pub fn toggle(&mut self, field: PreferenceField) {
        let value = !self.record.get(field);
        self.set_field(field, value);
    }

    /// Session-open write: new `lastViewedAt`, other fields kept.
    pub fn touch_last_viewed(&mut self) {
        let now = self.clock.now_millis();
        self.update(|p| p.with_last_viewed(now));
    }

    /// Pull the remote snapshot. A new revision replaces the cached record;
    /// a status change is picked up as-is. Returns whether anything changed.
    pub fn refresh(&mut self) -> bool {
        let snapshot = self
            .service
            .borrow_mut()
            .fetch(&self.identity, PREFERENCES_KEY);

        if snapshot.status == SyncStatus::Error || snapshot.revision == self.revision {
            return self.set_state(self.record, snapshot.status);
        }

        self.revision = snapshot.revision;
        let record = ClockPreferences::from_stored(snapshot.value.as_ref(), self.clock.now_millis());
        self.set_state(record, snapshot.status)
    }

    /// Register `callback`, invoked on every change of record or status.
    ///
    /// Callbacks run synchronously on the caller's loop and must not register
    /// further subscribers on this store.
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&ClockPreferences, SyncStatus) + 'static,
    {
        let active = Rc::new(Cell::new(true));
        self.subscribers.borrow_mut().push(Subscriber {
            active: active.clone(),
            callback: Box::new(callback),
        });
        Subscription {
            active,
            list: Rc::downgrade(&self.subscribers),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|s| s.active.get())
            .count()
    }

    fn set_state(&mut self, record: ClockPreferences, status: SyncStatus) -> bool {
        if record == self.record && status == self.status {
            return false;
        }
        self.record = record;
        self.status = status;
        self.notify();
        true
    }

    fn notify(&self) {
        let record = self.record;
        let status = self.status;
        let mut subs = self.subscribers.borrow_mut();
        for s in subs.iter_mut() {
            if s.active.get() {
                (s.callback)(&record, status);
            }
        }
        subs.retain(|s| s.active.get());
    }
}
