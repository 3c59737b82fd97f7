use rclock::cloud::memory::WriteMode;
use rclock::cloud::{MemoryCloud, RemoteStore};
use rclock::core::clock::{Clock, MockClock};
use rclock::core::preferences::PreferenceStore;
use rclock::models::preferences::PREFERENCES_KEY;
use rclock::models::{ClockPreferences, Identity, PreferenceField, SyncStatus};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

mod common;
use common::afternoon;

fn setup(cloud: MemoryCloud) -> (Rc<RefCell<MemoryCloud>>, Rc<dyn Clock>, Identity) {
    let clock: Rc<dyn Clock> = Rc::new(MockClock::new(afternoon()));
    (
        Rc::new(RefCell::new(cloud)),
        clock,
        Identity::from_email("alice@example.com"),
    )
}

#[test]
fn test_missing_record_is_created_with_defaults() {
    let (cloud, clock, id) = setup(MemoryCloud::new());

    let store = PreferenceStore::open(cloud.clone(), id.clone(), clock);

    let (prefs, status) = store.read();
    assert_eq!(prefs, ClockPreferences::defaults(afternoon()));
    assert_eq!(status, SyncStatus::Synced);
    assert_eq!(cloud.borrow().pushes().len(), 1);
    assert_eq!(
        cloud.borrow().stored(&id, PREFERENCES_KEY),
        Some(&json!({
            "format24h": false,
            "showSeconds": true,
            "showDate": true,
            "lastViewedAt": afternoon(),
        }))
    );
}

#[test]
fn test_existing_record_is_read_without_writing() {
    let (cloud, clock, id) = setup(MemoryCloud::new());
    cloud.borrow_mut().push_remote(
        &id,
        PREFERENCES_KEY,
        json!({"format24h": true, "showSeconds": false, "showDate": false, "lastViewedAt": 42}),
    );

    let store = PreferenceStore::open(cloud.clone(), id, clock);

    let (prefs, _) = store.read();
    assert!(prefs.format24h);
    assert!(!prefs.show_seconds);
    assert!(!prefs.show_date);
    assert_eq!(prefs.last_viewed_at, 42);
    assert!(cloud.borrow().pushes().is_empty());
}

#[test]
fn test_malformed_record_falls_back_to_defaults() {
    let (cloud, clock, id) = setup(MemoryCloud::new());
    cloud
        .borrow_mut()
        .push_remote(&id, PREFERENCES_KEY, json!({"format24h": "yes"}));

    let store = PreferenceStore::open(cloud, id, clock);

    assert_eq!(store.record(), ClockPreferences::defaults(afternoon()));
    assert_eq!(store.status(), SyncStatus::Synced);
}

#[test]
fn test_set_field_replaces_whole_record_with_one_change() {
    let (cloud, clock, id) = setup(MemoryCloud::new());
    let mut store = PreferenceStore::open(cloud.clone(), id, clock);
    let before = store.record();

    store.set_field(PreferenceField::ShowSeconds, false);

    let pushes = cloud.borrow().pushes().to_vec();
    assert_eq!(pushes.len(), 2);
    let last: ClockPreferences = serde_json::from_value(pushes[1].value.clone()).unwrap();
    assert_eq!(
        last,
        ClockPreferences {
            show_seconds: false,
            ..before
        }
    );
    assert_eq!(store.record(), last);
}

#[test]
fn test_session_open_is_a_single_merged_write() {
    let (cloud, _, id) = setup(MemoryCloud::new());
    cloud.borrow_mut().push_remote(
        &id,
        PREFERENCES_KEY,
        json!({"format24h": true, "showSeconds": false, "showDate": true, "lastViewedAt": 1}),
    );
    let clock = Rc::new(MockClock::new(afternoon() + 5_000));

    let store = PreferenceStore::open_session(cloud.clone(), id, clock);

    assert_eq!(cloud.borrow().pushes().len(), 1);
    assert_eq!(
        store.record(),
        ClockPreferences {
            format24h: true,
            show_seconds: false,
            show_date: true,
            last_viewed_at: afternoon() + 5_000,
        }
    );
}

#[test]
fn test_writes_reach_the_store_in_issue_order() {
    let (cloud, clock, id) = setup(MemoryCloud::new());
    let mut store = PreferenceStore::open(cloud.clone(), id, clock);

    store.toggle(PreferenceField::Format24h);
    store.toggle(PreferenceField::ShowDate);
    store.toggle(PreferenceField::Format24h);

    let seen: Vec<(bool, bool)> = cloud
        .borrow()
        .pushes()
        .iter()
        .skip(1)
        .map(|p| {
            (
                p.value["format24h"].as_bool().unwrap(),
                p.value["showDate"].as_bool().unwrap(),
            )
        })
        .collect();
    assert_eq!(seen, vec![(true, true), (true, false), (false, false)]);
}

#[test]
fn test_subscribers_see_local_writes_until_cancelled() {
    let (cloud, clock, id) = setup(MemoryCloud::new());
    let mut store = PreferenceStore::open(cloud, id, clock);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sub = {
        let seen = seen.clone();
        store.on_change(move |p, s| seen.borrow_mut().push((p.show_date, s)))
    };
    assert_eq!(store.subscriber_count(), 1);

    store.set_field(PreferenceField::ShowDate, false);
    assert_eq!(*seen.borrow(), vec![(false, SyncStatus::Synced)]);

    sub.cancel();
    assert_eq!(store.subscriber_count(), 0);

    store.set_field(PreferenceField::ShowDate, true);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn test_unchanged_write_does_not_notify() {
    let (cloud, clock, id) = setup(MemoryCloud::new());
    let mut store = PreferenceStore::open(cloud.clone(), id, clock);

    let calls = Rc::new(RefCell::new(0));
    let _sub = {
        let calls = calls.clone();
        store.on_change(move |_, _| *calls.borrow_mut() += 1)
    };

    store.set_field(PreferenceField::ShowSeconds, true);

    assert_eq!(*calls.borrow(), 0);
    assert_eq!(cloud.borrow().pushes().len(), 2, "the write is still issued");
}

#[test]
fn test_remote_update_wins_and_notifies() {
    let (cloud, clock, id) = setup(MemoryCloud::new());
    let mut store = PreferenceStore::open(cloud.clone(), id.clone(), clock);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let seen = seen.clone();
        store.on_change(move |p, _| seen.borrow_mut().push(*p))
    };

    assert!(!store.refresh(), "nothing changed remotely yet");

    let remote = json!({"format24h": true, "showSeconds": true, "showDate": false, "lastViewedAt": 7});
    cloud.borrow_mut().push_remote(&id, PREFERENCES_KEY, remote);

    assert!(store.refresh());
    assert!(store.record().format24h);
    assert!(!store.record().show_date);
    assert_eq!(store.record().last_viewed_at, 7);
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(cloud.borrow().pushes().len(), 1, "no local write on remote change");
}

#[test]
fn test_failed_write_surfaces_as_error_status() {
    let (cloud, clock, id) = setup(MemoryCloud::new());
    let mut store = PreferenceStore::open(cloud.clone(), id.clone(), clock);
    cloud.borrow_mut().set_write_mode(WriteMode::Failing);

    store.set_field(PreferenceField::Format24h, true);

    let (prefs, status) = store.read();
    assert!(prefs.format24h, "local cache keeps the edit");
    assert_eq!(status, SyncStatus::Error);
    assert_eq!(
        cloud.borrow().stored(&id, PREFERENCES_KEY).unwrap()["format24h"],
        json!(false)
    );

    // the error stays visible, the cached edit is not rolled back
    assert!(!store.refresh());
    assert!(store.record().format24h);
}

#[test]
fn test_deferred_write_reports_syncing_then_synced() {
    let (cloud, clock, id) = setup(MemoryCloud::new());
    let mut store = PreferenceStore::open(cloud.clone(), id, clock);
    cloud.borrow_mut().set_write_mode(WriteMode::Deferred);

    store.toggle(PreferenceField::ShowDate);
    assert_eq!(store.status(), SyncStatus::Syncing);

    cloud.borrow_mut().settle();
    assert!(store.refresh());
    assert_eq!(store.status(), SyncStatus::Synced);
    assert!(!store.record().show_date);
}

#[test]
fn test_identities_are_isolated() {
    let (cloud, clock, alice) = setup(MemoryCloud::new());
    let bob = Identity::from_email("Bob@Example.com");

    let mut a = PreferenceStore::open(cloud.clone(), alice.clone(), clock.clone());
    let b = PreferenceStore::open(cloud.clone(), bob.clone(), clock);

    a.set_field(PreferenceField::Format24h, true);

    assert!(a.record().format24h);
    assert!(!b.record().format24h);
    assert_eq!(b.identity().as_str(), "bob@example.com");
    let snapshot = cloud.borrow_mut().fetch(&bob, PREFERENCES_KEY);
    assert_eq!(snapshot.value.unwrap()["format24h"], json!(false));
}
