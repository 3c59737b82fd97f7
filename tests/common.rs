#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rclock::cloud::MemoryCloud;
use rclock::core::clock::MockClock;
use rclock::core::controller::ViewController;
use rclock::models::User;
use rclock::utils::time::local_millis;
use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

pub fn rcl() -> Command {
    cargo_bin_cmd!("rclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Epoch milliseconds of a local wall-clock time
pub fn local_ms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
    let dt = NaiveDate::from_ymd_opt(y, mo, d)
        .expect("valid date")
        .and_hms_opt(h, mi, s)
        .expect("valid time");
    local_millis(&dt).expect("local time exists")
}

/// 2024-01-15 14:30:45 local
pub fn afternoon() -> i64 {
    local_ms(2024, 1, 15, 14, 30, 45)
}

pub fn alice() -> User {
    User::new("alice@example.com")
}

pub type TestController = ViewController<MemoryCloud, MockClock>;

pub struct Harness {
    pub cloud: Rc<RefCell<MemoryCloud>>,
    pub clock: Rc<MockClock>,
    pub controller: TestController,
}

/// Controller over `cloud`, with a mock clock starting at `start_ms` and a one-second tick
pub fn harness(cloud: MemoryCloud, start_ms: i64) -> Harness {
    let cloud = Rc::new(RefCell::new(cloud));
    let clock = Rc::new(MockClock::new(start_ms));
    let controller = ViewController::open(cloud.clone(), clock.clone(), Duration::from_secs(1));
    Harness {
        cloud,
        clock,
        controller,
    }
}

/// Signed-out service whose next sign-in yields alice
pub fn signed_out_cloud() -> MemoryCloud {
    let mut cloud = MemoryCloud::new();
    cloud.set_login(alice());
    cloud
}
