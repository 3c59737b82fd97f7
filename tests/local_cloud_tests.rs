use rclock::cloud::local::STARTING_CREDITS;
use rclock::cloud::{AuthService, LocalCloud, RemoteStore, SubscriptionService};
use rclock::core::clock::MockClock;
use rclock::core::controller::{ViewController, ViewState};
use rclock::db::migrate::applied_versions;
use rclock::errors::AppError;
use rclock::models::preferences::PREFERENCES_KEY;
use rclock::models::{PreferenceField, SyncStatus, User};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

mod common;
use common::{afternoon, alice, setup_test_db};

#[test]
fn test_migrations_are_applied_once() {
    let db = setup_test_db("local_migrations");

    let first = LocalCloud::open(&db).unwrap();
    let versions = applied_versions(first.conn()).unwrap();
    assert_eq!(versions.len(), 2);
    drop(first);

    let again = LocalCloud::open(&db).unwrap();
    assert_eq!(applied_versions(again.conn()).unwrap(), versions);
}

#[test]
fn test_sign_in_requires_an_account() {
    let mut cloud = LocalCloud::open_in_memory().unwrap();

    assert!(matches!(cloud.sign_in(), Err(AppError::Auth(_))));
    assert!(!cloud.is_signed_in());
}

#[test]
fn test_session_round_trip() {
    let user = User::new("carol@example.com").with_avatar("https://img.example.com/c.png");
    let mut cloud = LocalCloud::open_in_memory()
        .unwrap()
        .with_login(Some(user.clone()));

    assert_eq!(cloud.sign_in().unwrap(), user);
    assert_eq!(cloud.current_user(), Some(user.clone()));

    cloud.sign_out().unwrap();
    assert_eq!(cloud.current_user(), None);
}

#[test]
fn test_push_bumps_revision() {
    let mut cloud = LocalCloud::open_in_memory().unwrap();
    let id = alice().identity();

    let empty = cloud.fetch(&id, PREFERENCES_KEY);
    assert_eq!(empty.value, None);
    assert_eq!(empty.revision, 0);

    let r1 = cloud.push(&id, PREFERENCES_KEY, json!({"a": 1}));
    let r2 = cloud.push(&id, PREFERENCES_KEY, json!({"a": 2}));
    assert_eq!((r1.revision, r1.status), (1, SyncStatus::Synced));
    assert_eq!(r2.revision, 2);

    let snap = cloud.fetch(&id, PREFERENCES_KEY);
    assert_eq!(snap.value, Some(json!({"a": 2})));
    assert_eq!(snap.revision, 2);
}

#[test]
fn test_undecodable_row_is_reported_as_missing_value() {
    let mut cloud = LocalCloud::open_in_memory().unwrap();
    let id = alice().identity();
    cloud
        .conn()
        .execute(
            "INSERT INTO records (identity, key, value, revision, updated_at)
             VALUES (?1, ?2, 'not json', 3, '2024-01-15T00:00:00Z')",
            [id.as_str(), PREFERENCES_KEY],
        )
        .unwrap();

    let snap = cloud.fetch(&id, PREFERENCES_KEY);
    assert_eq!(snap.value, None);
    assert_eq!(snap.revision, 3);
}

#[test]
fn test_account_starts_free_and_can_subscribe() {
    let mut cloud = LocalCloud::open_in_memory()
        .unwrap()
        .with_login(Some(alice()));
    let id = alice().identity();
    assert!(!cloud.can_subscribe(&id));

    cloud.sign_in().unwrap();

    assert_eq!(cloud.usage(&id).unwrap().remaining_credits, STARTING_CREDITS);
    assert_eq!(cloud.subscription_status(&id), None);
    assert!(cloud.can_subscribe(&id));

    cloud.subscribe(&id).unwrap();
    let status = cloud.subscription_status(&id).unwrap();
    assert_eq!(status.plan.name, "Pro");
    assert_eq!(status.status, "active");
}

#[test]
fn test_operations_are_logged() {
    let mut cloud = LocalCloud::open_in_memory()
        .unwrap()
        .with_login(Some(alice()));
    cloud.sign_in().unwrap();
    cloud.push(&alice().identity(), PREFERENCES_KEY, json!({}));
    cloud.sign_out().unwrap();

    let mut stmt = cloud
        .conn()
        .prepare("SELECT operation FROM log WHERE operation != 'migration_applied' ORDER BY id")
        .unwrap();
    let ops: Vec<String> = stmt
        .query_map([], |r| r.get(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(ops, vec!["sign_in", "write", "sign_out"]);
}

#[test]
fn test_two_sessions_share_the_record() {
    let db = setup_test_db("local_two_sessions");
    let clock = Rc::new(MockClock::new(afternoon()));

    let first = Rc::new(RefCell::new(
        LocalCloud::open(&db).unwrap().with_login(Some(alice())),
    ));
    let mut a = ViewController::open(first, clock.clone(), Duration::from_secs(1));
    a.sign_in().unwrap();
    assert_eq!(a.face().unwrap().time, "02:30:45 PM");

    // a second terminal, same identity
    let second = Rc::new(RefCell::new(LocalCloud::open(&db).unwrap()));
    let mut b = ViewController::open(second, clock.clone(), Duration::from_secs(1));
    assert_eq!(b.state(), ViewState::SignedIn);
    b.set_preference(PreferenceField::Format24h, true).unwrap();

    a.tick();
    assert_eq!(a.face().unwrap().time, "14:30:46");
}

const DENY_UPDATES: &str = "CREATE TRIGGER deny_updates BEFORE UPDATE ON records
     BEGIN SELECT RAISE(ABORT, 'records are read-only'); END;";

#[test]
fn test_logout_from_another_session_stops_the_clock() {
    let db = setup_test_db("local_remote_logout");
    let clock = Rc::new(MockClock::new(afternoon()));

    let first = Rc::new(RefCell::new(
        LocalCloud::open(&db).unwrap().with_login(Some(alice())),
    ));
    let mut a = ViewController::open(first, clock.clone(), Duration::from_secs(1));
    a.sign_in().unwrap();
    let token = a.time_source_token().unwrap();

    // `rclock logout` in a second terminal
    let mut second = LocalCloud::open(&db).unwrap();
    second.sign_out().unwrap();

    assert_eq!(a.tick(), None);
    assert_eq!(a.state(), ViewState::SignedOut);
    assert!(token.is_cancelled());
    assert_eq!(a.tick(), None);
}

#[test]
fn test_rejected_write_stays_in_error_across_ticks() {
    let cloud = Rc::new(RefCell::new(
        LocalCloud::open_in_memory().unwrap().with_login(Some(alice())),
    ));
    let clock = Rc::new(MockClock::new(afternoon()));
    let mut c = ViewController::open(cloud.clone(), clock, Duration::from_secs(1));
    c.sign_in().unwrap();
    cloud.borrow().conn().execute_batch(DENY_UPDATES).unwrap();

    c.toggle(PreferenceField::Format24h).unwrap();
    assert_eq!(c.preferences().unwrap().1, SyncStatus::Error);

    for _ in 0..3 {
        c.tick();
    }
    let (prefs, status) = c.preferences().unwrap();
    assert!(prefs.format24h, "local edit is kept");
    assert_eq!(status, SyncStatus::Error);
    assert_eq!(c.face().unwrap().status, SyncStatus::Error);

    let stored = cloud.borrow_mut().fetch(&alice().identity(), PREFERENCES_KEY);
    assert_eq!(stored.value.unwrap()["format24h"], json!(false));

    // the store accepts writes again: the next edit carries the whole record
    cloud
        .borrow()
        .conn()
        .execute_batch("DROP TRIGGER deny_updates")
        .unwrap();
    c.toggle(PreferenceField::ShowSeconds).unwrap();
    c.tick();

    let (prefs, status) = c.preferences().unwrap();
    assert_eq!(status, SyncStatus::Synced);
    let stored = cloud.borrow_mut().fetch(&alice().identity(), PREFERENCES_KEY);
    assert_eq!(stored.status, SyncStatus::Synced);
    let value = stored.value.unwrap();
    assert_eq!(value["format24h"], json!(true));
    assert_eq!(value["showSeconds"], json!(prefs.show_seconds));
}

#[test]
fn test_newer_write_from_another_session_clears_the_error() {
    let db = setup_test_db("local_error_superseded");
    let clock = Rc::new(MockClock::new(afternoon()));

    let first = Rc::new(RefCell::new(
        LocalCloud::open(&db).unwrap().with_login(Some(alice())),
    ));
    let mut a = ViewController::open(first.clone(), clock.clone(), Duration::from_secs(1));
    a.sign_in().unwrap();

    first.borrow().conn().execute_batch(DENY_UPDATES).unwrap();
    a.toggle(PreferenceField::ShowDate).unwrap();
    assert_eq!(a.preferences().unwrap().1, SyncStatus::Error);
    first
        .borrow()
        .conn()
        .execute_batch("DROP TRIGGER deny_updates")
        .unwrap();

    let second = Rc::new(RefCell::new(LocalCloud::open(&db).unwrap()));
    let mut b = ViewController::open(second, clock.clone(), Duration::from_secs(1));
    b.set_preference(PreferenceField::Format24h, true).unwrap();

    a.tick();
    let (prefs, status) = a.preferences().unwrap();
    assert_eq!(status, SyncStatus::Synced);
    assert!(prefs.format24h);
    assert!(prefs.show_date, "rejected edit is replaced by the newer record");
}
