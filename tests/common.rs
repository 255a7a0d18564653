#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use std::env;
use std::fs;
use std::path::PathBuf;
use tasktracker::config::HOME_ENV;
use tasktracker::core::add::{AddLogic, SessionDraft};
use tasktracker::db::DbPool;
use tasktracker::identity::DeviceId;
use tasktracker::models::Session;

/// Config directory shared by CLI tests; nothing is ever saved to it because
/// `init` always runs with `--test`.
pub fn test_home() -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push("tasktracker_test_home");
    fs::create_dir_all(&path).ok();
    path
}

pub fn tt() -> Command {
    let mut cmd = cargo_bin_cmd!("tasktracker");
    cmd.env(HOME_ENV, test_home());
    cmd
}

/// Same as `tt()` but with a dedicated config directory.
pub fn tt_home(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("tasktracker");
    cmd.env(HOME_ENV, home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tasktracker.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, empty directory inside tempdir
pub fn temp_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tasktracker_dir", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path.to_string_lossy().to_string()
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    tt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    add_via_cli(
        db_path,
        "Website redesign",
        "2025-09-01 09:00:00",
        "2025-09-01 17:00:00",
        "20",
    );
    add_via_cli(
        db_path,
        "Invoice tooling",
        "2025-09-15 09:00:00",
        "2025-09-15 12:00:00",
        "30",
    );
    add_via_cli(
        db_path,
        "Old audit",
        "2024-12-30 10:00:00",
        "2024-12-30 11:30:00",
        "40",
    );
}

pub fn add_via_cli(db_path: &str, title: &str, start: &str, end: &str, rate: &str) {
    tt().args([
        "--db", db_path, "add", "--title", title, "--start", start, "--end", end, "--rate", rate,
    ])
    .assert()
    .success();
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("valid timestamp")
}

pub fn device() -> DeviceId {
    DeviceId::new("test-device")
}

pub fn memory_pool() -> DbPool {
    DbPool::in_memory().expect("in-memory store")
}

/// Record a session through the library API
pub fn record(pool: &mut DbPool, title: &str, start: &str, end: &str, rate: f64) -> Session {
    AddLogic::record(
        pool,
        &device(),
        &SessionDraft {
            title: title.to_string(),
            description: String::new(),
            start: ts(start),
            end: ts(end),
            hourly_rate: rate,
        },
    )
    .expect("record session")
}
