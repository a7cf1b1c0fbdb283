use predicates::str::contains;

mod common;
use common::{count_entries, rwl, setup_test_db};

#[test]
fn test_timer_lifecycle() {
    let db_path = setup_test_db("timer_lifecycle");

    rwl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "timer", "status"])
        .assert()
        .success()
        .stdout(contains("No timer is running"));

    rwl()
        .args(["--db", &db_path, "timer", "start", "--en", "Painting"])
        .assert()
        .success()
        .stdout(contains("Timer started"));

    rwl()
        .args(["--db", &db_path, "timer", "start"])
        .assert()
        .failure()
        .stderr(contains("already running"));

    rwl()
        .args(["--db", &db_path, "timer", "status"])
        .assert()
        .success()
        .stdout(contains("Running since"));

    rwl()
        .args(["--db", &db_path, "timer", "stop"])
        .assert()
        .success()
        .stdout(contains("Entry #1 added"));

    assert_eq!(count_entries(&db_path), 1);

    rwl()
        .args(["--db", &db_path, "timer", "stop"])
        .assert()
        .failure()
        .stderr(contains("No timer is running"));
}

#[test]
fn test_timer_cancel_stores_nothing() {
    let db_path = setup_test_db("timer_cancel");

    rwl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "timer", "start"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "timer", "cancel"])
        .assert()
        .success()
        .stdout(contains("Timer cancelled"));

    assert_eq!(count_entries(&db_path), 0);
}
