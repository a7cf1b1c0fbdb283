use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{init_db_with_data, rwl, setup_test_db, temp_out};

#[test]
fn test_export_csv_all() {
    let db_path = setup_test_db("export_csv_all");
    let out = temp_out("export_csv_all", "csv");
    init_db_with_data(&db_path);

    rwl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--sort", "date",
            "--order", "asc",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("csv written");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "id,date,start,end,duration_hours,materials_cost,comment_en,comment_nl,photo"
    );
    assert_eq!(lines.len(), 7);
    assert_eq!(
        lines[1],
        "1,2024-01-01,08:00,18:00,10.00,0.00,Kitchen tiles,Keuken tegels,"
    );
    assert_eq!(
        lines[5],
        "5,2024-01-05,08:00,12:00,4.00,25.50,,,/photos/receipt.jpg"
    );
}

#[test]
fn test_export_csv_range() {
    let db_path = setup_test_db("export_csv_range");
    let out = temp_out("export_csv_range", "csv");
    init_db_with_data(&db_path);

    rwl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2024-02",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("csv written");
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("6,2024-02-05,09:00,11:00,2.00,0.00,Fence repair,,"));
}

#[test]
fn test_export_json_is_array_of_rows() {
    let db_path = setup_test_db("export_json");
    let out = temp_out("export_json", "json");
    init_db_with_data(&db_path);

    rwl()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--photos",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("json written");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["date"], "2024-01-05");
    assert_eq!(rows[0]["materials_cost"], 25.5);
    assert_eq!(rows[0]["duration_hours"], 4.0);
}

#[test]
fn test_export_xlsx_and_pdf() {
    let db_path = setup_test_db("export_binary");
    init_db_with_data(&db_path);

    for fmt in ["xlsx", "pdf"] {
        let out = temp_out(&format!("export_binary_{fmt}"), fmt);
        rwl()
            .args(["--db", &db_path, "export", "--format", fmt, "--file", &out])
            .assert()
            .success();

        let bytes = fs::read(&out).expect("file written");
        assert!(!bytes.is_empty());
        if fmt == "pdf" {
            assert!(bytes.starts_with(b"%PDF"));
        } else {
            // xlsx is a zip container
            assert!(bytes.starts_with(b"PK"));
        }
    }
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    rwl()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("absolute"));

    assert!(!Path::new("relative.csv").exists());
}

#[test]
fn test_export_empty_selection_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    let out = temp_out("export_empty", "csv");
    init_db_with_data(&db_path);

    rwl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2023",
        ])
        .assert()
        .success()
        .stdout(contains("No work entries found"));

    assert!(!Path::new(&out).exists());
}

#[test]
fn test_export_existing_file_needs_confirmation_or_force() {
    let db_path = setup_test_db("export_overwrite");
    let out = temp_out("export_overwrite", "csv");
    init_db_with_data(&db_path);
    fs::write(&out, "keep me").unwrap();

    rwl()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    rwl()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("already exists").not());
    assert!(fs::read_to_string(&out).unwrap().starts_with("id,date"));
}
