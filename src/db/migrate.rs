use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the `work_entries` table with the modern schema.
fn create_work_entries_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS work_entries (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            date            TEXT NOT NULL,
            start_time      TEXT NOT NULL,
            end_time        TEXT NOT NULL,
            comment_en      TEXT NOT NULL DEFAULT '',
            comment_nl      TEXT NOT NULL DEFAULT '',
            photo           TEXT,
            materials_cost  REAL NOT NULL DEFAULT 0 CHECK(materials_cost >= 0),
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL DEFAULT '',
            CHECK(end_time >= start_time)
        );

        CREATE INDEX IF NOT EXISTS idx_work_entries_date_start ON work_entries(date, start_time);
        "#,
    )?;
    Ok(())
}

/// Single-row table holding the running timer, if any.
fn create_active_timer_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS active_timer (
            id          INTEGER PRIMARY KEY CHECK(id = 1),
            started_at  TEXT NOT NULL,
            comment_en  TEXT NOT NULL DEFAULT '',
            comment_nl  TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

/// Zip the database file next to itself before touching a legacy schema.
fn backup_before_migration(conn: &Connection, tag: &str) -> AppResult<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let db_path: String = conn
        .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default();

    // in-memory or temporary database
    if db_path.is_empty() {
        warning("Could not determine DB path, backup skipped.");
        return Ok(());
    }

    let db_path = std::path::Path::new(&db_path);
    let backup_name = format!(
        "{}-backup_db_pre_{}.zip",
        Local::now().format("%Y%m%d_%H%M%S"),
        tag
    );
    let backup_path = db_path
        .parent()
        .map(|p| p.join(&backup_name))
        .unwrap_or_else(|| backup_name.clone().into());

    let to_migration_err = |stage: &str, e: &dyn std::fmt::Display| {
        AppError::Migration(format!("Backup failed ({stage}): {e}"))
    };

    let file = File::create(&backup_path).map_err(|e| to_migration_err("create", &e))?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| to_migration_err("start_file", &e))?;

    let db_content = fs::read(db_path).map_err(|e| to_migration_err("read", &e))?;
    zip.write_all(&db_content)
        .map_err(|e| to_migration_err("write_all", &e))?;
    zip.finish().map_err(|e| to_migration_err("finish", &e))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

fn work_entries_has_checks(conn: &Connection) -> AppResult<bool> {
    let sql: Option<String> = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type='table' AND name='work_entries'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let sql = sql.unwrap_or_default().replace(' ', "");
    Ok(sql.contains("CHECK(end_time>=start_time)") && sql.contains("CHECK(materials_cost>=0)"))
}

/// Older databases stored only date, times and comments, without the
/// interval and cost constraints. The table is rebuilt with the modern
/// schema and the rows copied over.
fn migrate_add_cost_and_updated_at(conn: &Connection) -> AppResult<()> {
    let version = "20250214_0002_add_materials_cost";

    if is_applied(conn, version)? {
        return Ok(());
    }

    let has_cost = table_has_column(conn, "work_entries", "materials_cost")?;
    let has_updated = table_has_column(conn, "work_entries", "updated_at")?;

    if !has_cost || !has_updated || !work_entries_has_checks(conn)? {
        warning("Legacy schema detected, creating safety backup before migration...");
        backup_before_migration(conn, "materials_cost")?;

        let inverted: i64 = conn.query_row(
            "SELECT COUNT(*) FROM work_entries WHERE end_time < start_time",
            [],
            |r| r.get(0),
        )?;
        if inverted > 0 {
            return Err(AppError::Migration(format!(
                "{inverted} legacy entries end before they start; fix them and run `db --migrate` again"
            )));
        }

        let cost = if has_cost {
            "MAX(COALESCE(materials_cost, 0), 0)"
        } else {
            "0"
        };
        let updated = if has_updated {
            "CASE WHEN COALESCE(updated_at, '') = '' THEN created_at ELSE updated_at END"
        } else {
            "created_at"
        };

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch("ALTER TABLE work_entries RENAME TO work_entries_legacy;")?;
        create_work_entries_table(&tx)?;
        tx.execute(
            &format!(
                "INSERT INTO work_entries
                    (id, date, start_time, end_time, comment_en, comment_nl, photo,
                     materials_cost, created_at, updated_at)
                 SELECT id, date, start_time, end_time,
                        COALESCE(comment_en, ''), COALESCE(comment_nl, ''), photo,
                        {cost}, created_at, {updated}
                   FROM work_entries_legacy"
            ),
            [],
        )
        .map_err(|e| AppError::Migration(format!("Failed to copy legacy entries: {e}")))?;
        tx.execute_batch(
            "DROP TABLE work_entries_legacy;
             CREATE INDEX IF NOT EXISTS idx_work_entries_date_start ON work_entries(date, start_time);",
        )?;
        tx.commit()?;

        success(format!(
            "Migration applied: {} → work_entries rebuilt with cost and interval checks",
            version
        ));
    }

    mark_applied(conn, version, "work_entries carries materials_cost, updated_at and checks")?;
    Ok(())
}

fn migrate_create_active_timer(conn: &Connection) -> AppResult<()> {
    let version = "20250301_0003_create_active_timer";

    if is_applied(conn, version)? {
        return Ok(());
    }

    create_active_timer_table(conn)?;
    mark_applied(conn, version, "Created active_timer table")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Work entries: fresh databases get the modern table directly
    if !table_exists(conn, "work_entries")? {
        create_work_entries_table(conn)?;
        mark_applied(
            conn,
            "20250110_0001_create_work_entries",
            "Created work_entries table",
        )?;
        success("Created work_entries table (modern schema).");
    } else {
        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_work_entries_date_start ON work_entries(date, start_time);",
        )?;
    }

    // 3) Versioned upgrades
    migrate_add_cost_and_updated_at(conn)?;
    migrate_create_active_timer(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, 3);
        assert!(table_exists(&conn, "active_timer").unwrap());
    }

    #[test]
    fn legacy_table_gets_new_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE work_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                comment_en TEXT NOT NULL DEFAULT '',
                comment_nl TEXT NOT NULL DEFAULT '',
                photo TEXT,
                created_at TEXT NOT NULL
            );
            INSERT INTO work_entries (date, start_time, end_time, created_at)
            VALUES ('2024-01-01', '09:00', '17:00', '2024-01-01T17:00:00+01:00');",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        assert!(table_has_column(&conn, "work_entries", "materials_cost").unwrap());
        let updated: String = conn
            .query_row("SELECT updated_at FROM work_entries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(updated, "2024-01-01T17:00:00+01:00");
    }

    #[test]
    fn end_before_start_violates_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        let res = conn.execute(
            "INSERT INTO work_entries (date, start_time, end_time, created_at)
             VALUES ('2024-01-01', '17:00', '09:00', 'x')",
            [],
        );
        assert!(res.is_err());
    }

    #[test]
    fn rebuilt_legacy_table_enforces_checks() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE work_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                comment_en TEXT NOT NULL DEFAULT '',
                comment_nl TEXT NOT NULL DEFAULT '',
                photo TEXT,
                materials_cost REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );
            CREATE INDEX idx_work_entries_date_start ON work_entries(date, start_time);
            INSERT INTO work_entries (id, date, start_time, end_time, materials_cost, created_at)
            VALUES (7, '2024-01-01', '09:00', '17:00', 12.5, 'c');",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        let (id, cost): (i64, f64) = conn
            .query_row("SELECT id, materials_cost FROM work_entries", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!((id, cost), (7, 12.5));
        assert!(!table_exists(&conn, "work_entries_legacy").unwrap());
        assert!(work_entries_has_checks(&conn).unwrap());

        let negative = conn.execute(
            "INSERT INTO work_entries (date, start_time, end_time, materials_cost, created_at)
             VALUES ('2024-01-02', '09:00', '10:00', -1, 'x')",
            [],
        );
        assert!(negative.is_err());
    }

    #[test]
    fn inverted_legacy_rows_stop_the_rebuild() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE work_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                comment_en TEXT NOT NULL DEFAULT '',
                comment_nl TEXT NOT NULL DEFAULT '',
                photo TEXT,
                created_at TEXT NOT NULL
            );
            INSERT INTO work_entries (date, start_time, end_time, created_at)
            VALUES ('2024-01-01', '17:00', '09:00', 'c');",
        )
        .unwrap();

        assert!(matches!(run_pending_migrations(&conn), Err(AppError::Migration(_))));
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM work_entries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
