#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, isolated from the user's real configuration directory.
pub fn rwl() -> Command {
    let mut cmd = cargo_bin_cmd!("rworklog");
    let cfg_dir = env::temp_dir().join("rworklog_tests_config");
    cmd.env("RWORKLOG_CONFIG_DIR", cfg_dir);
    cmd
}

/// Binary under test with its own configuration directory.
pub fn rwl_in(config_dir: &std::path::Path) -> Command {
    let mut cmd = cargo_bin_cmd!("rworklog");
    cmd.env("RWORKLOG_CONFIG_DIR", config_dir);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworklog.sqlite", name));
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

pub fn add(db_path: &str, date: &str, start: &str, end: &str, extra: &[&str]) {
    let mut args = vec!["--db", db_path, "add", date, "--in", start, "--out", end];
    args.extend_from_slice(extra);
    rwl().args(&args).assert().success();
}

/// Initialize DB and add a small dataset useful for many tests.
///
/// ISO week 1 of 2024 holds 44h (4h overtime at 40h/week); one more
/// 2h entry sits in February.
pub fn init_db_with_data(db_path: &str) {
    rwl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    add(
        db_path,
        "2024-01-01",
        "08:00",
        "18:00",
        &["--en", "Kitchen tiles", "--nl", "Keuken tegels"],
    );
    add(db_path, "2024-01-02", "08:00", "18:00", &[]);
    add(db_path, "2024-01-03", "08:00", "18:00", &[]);
    add(db_path, "2024-01-04", "08:00", "18:00", &[]);
    add(
        db_path,
        "2024-01-05",
        "08:00",
        "12:00",
        &["--cost", "25.5", "--photo", "/photos/receipt.jpg"],
    );
    add(db_path, "2024-02-05", "09:00", "11:00", &["--en", "Fence repair"]);
}

pub fn count_entries(db_path: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    rworklog::db::queries::count_entries(&conn).expect("count")
}
