use crate::errors::{AppError, AppResult};
use crate::models::{ActiveTimer, WorkEntry};
use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const ENTRY_COLUMNS: &str = "id, date, start_time, end_time, comment_en, comment_nl, photo, \
                             materials_cost, created_at, updated_at";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<WorkEntry> {
    let date_str: String = row.get("date")?;
    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(1, AppError::InvalidDate(date_str.clone())))?;

    let start = NaiveTime::parse_from_str(&start_str, "%H:%M")
        .map_err(|_| conversion_error(2, AppError::InvalidTime(start_str.clone())))?;

    let end = NaiveTime::parse_from_str(&end_str, "%H:%M")
        .map_err(|_| conversion_error(3, AppError::InvalidTime(end_str.clone())))?;

    Ok(WorkEntry {
        id: row.get("id")?,
        date,
        start,
        end,
        comment_en: row.get("comment_en")?,
        comment_nl: row.get("comment_nl")?,
        photo: row.get("photo")?,
        materials_cost: row.get("materials_cost")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Insert a new entry and return its id. `entry.id` is ignored.
pub fn insert_entry(conn: &Connection, entry: &WorkEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO work_entries
            (date, start_time, end_time, comment_en, comment_nl, photo, materials_cost, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            entry.date_str(),
            entry.start_str(),
            entry.end_str(),
            entry.comment_en,
            entry.comment_nl,
            entry.photo,
            entry.materials_cost,
            entry.created_at,
            entry.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_entry(conn: &Connection, entry: &WorkEntry) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE work_entries
            SET date = ?1, start_time = ?2, end_time = ?3, comment_en = ?4, comment_nl = ?5,
                photo = ?6, materials_cost = ?7, updated_at = ?8
          WHERE id = ?9",
        params![
            entry.date_str(),
            entry.start_str(),
            entry.end_str(),
            entry.comment_en,
            entry.comment_nl,
            entry.photo,
            entry.materials_cost,
            entry.updated_at,
            entry.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::EntryNotFound(entry.id));
    }
    Ok(())
}

/// Insert keeping `entry.id` (used by restore in replace mode).
pub fn insert_entry_with_id(conn: &Connection, entry: &WorkEntry) -> AppResult<()> {
    conn.execute(
        "INSERT INTO work_entries
            (id, date, start_time, end_time, comment_en, comment_nl, photo, materials_cost, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            entry.id,
            entry.date_str(),
            entry.start_str(),
            entry.end_str(),
            entry.comment_en,
            entry.comment_nl,
            entry.photo,
            entry.materials_cost,
            entry.created_at,
            entry.updated_at,
        ],
    )?;
    Ok(())
}

/// Returns `false` when no row had that id.
pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM work_entries WHERE id = ?1", [id])?;
    Ok(n > 0)
}

pub fn delete_all_entries(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM work_entries", [])?)
}

pub fn load_entry(conn: &Connection, id: i64) -> AppResult<Option<WorkEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_COLUMNS} FROM work_entries WHERE id = ?1"
    ))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// All entries, oldest first.
pub fn load_all_entries(conn: &Connection) -> AppResult<Vec<WorkEntry>> {
    load_entries_between(conn, None, None)
}

/// Entries with `from <= date <= to`; a missing bound is open.
pub fn load_entries_between(
    conn: &Connection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> AppResult<Vec<WorkEntry>> {
    let from_s = from.map(|d| d.format("%Y-%m-%d").to_string());
    let to_s = to.map(|d| d.format("%Y-%m-%d").to_string());

    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_COLUMNS} FROM work_entries
          WHERE (?1 IS NULL OR date >= ?1)
            AND (?2 IS NULL OR date <= ?2)
          ORDER BY date ASC, start_time ASC, id ASC"
    ))?;

    let rows = stmt.query_map(params![from_s, to_s], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_entries(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM work_entries", [], |row| row.get(0))?)
}

// ---------------------------
// Active timer
// ---------------------------

pub fn load_active_timer(conn: &Connection) -> AppResult<Option<ActiveTimer>> {
    let row: Option<(String, String, String)> = conn
        .query_row(
            "SELECT started_at, comment_en, comment_nl FROM active_timer WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;

    match row {
        None => Ok(None),
        Some((started, en, nl)) => {
            let started_at = DateTime::parse_from_rfc3339(&started)
                .map_err(|_| AppError::InvalidDate(started.clone()))?
                .with_timezone(&Local);
            Ok(Some(ActiveTimer {
                started_at,
                comment_en: en,
                comment_nl: nl,
            }))
        }
    }
}

pub fn insert_active_timer(conn: &Connection, timer: &ActiveTimer) -> AppResult<()> {
    conn.execute(
        "INSERT INTO active_timer (id, started_at, comment_en, comment_nl) VALUES (1, ?1, ?2, ?3)",
        params![
            timer.started_at.to_rfc3339(),
            timer.comment_en,
            timer.comment_nl
        ],
    )?;
    Ok(())
}

pub fn delete_active_timer(conn: &Connection) -> AppResult<bool> {
    Ok(conn.execute("DELETE FROM active_timer", [])? > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        run_pending_migrations(&c).unwrap();
        c
    }

    fn entry(date: &str, start: &str, end: &str) -> WorkEntry {
        WorkEntry::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        )
    }

    #[test]
    fn insert_load_update_delete() {
        let c = conn();
        let e = entry("2024-03-01", "08:00", "12:00")
            .with_comments("Tiling", "Tegelen")
            .with_cost(12.5);

        let id = insert_entry(&c, &e).unwrap();
        let mut loaded = load_entry(&c, id).unwrap().unwrap();
        assert_eq!(loaded.comment_nl, "Tegelen");
        assert_eq!(loaded.materials_cost, 12.5);
        assert_eq!(loaded.duration_minutes(), 240);

        loaded.end = NaiveTime::from_hms_opt(13, 0, 0).unwrap();
        update_entry(&c, &loaded).unwrap();
        assert_eq!(load_entry(&c, id).unwrap().unwrap().end_str(), "13:00");

        assert!(delete_entry(&c, id).unwrap());
        assert!(!delete_entry(&c, id).unwrap());
        assert!(load_entry(&c, id).unwrap().is_none());
    }

    #[test]
    fn update_of_missing_row_fails() {
        let c = conn();
        let mut e = entry("2024-03-01", "08:00", "12:00");
        e.id = 99;
        assert!(matches!(update_entry(&c, &e), Err(AppError::EntryNotFound(99))));
    }

    #[test]
    fn range_query_is_inclusive_and_ordered() {
        let c = conn();
        insert_entry(&c, &entry("2024-03-02", "13:00", "14:00")).unwrap();
        insert_entry(&c, &entry("2024-03-01", "08:00", "09:00")).unwrap();
        insert_entry(&c, &entry("2024-03-02", "08:00", "09:00")).unwrap();
        insert_entry(&c, &entry("2024-03-05", "08:00", "09:00")).unwrap();

        let d = |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let got = load_entries_between(&c, Some(d("2024-03-01")), Some(d("2024-03-02"))).unwrap();
        let keys: Vec<(String, String)> = got.iter().map(|e| (e.date_str(), e.start_str())).collect();
        assert_eq!(
            keys,
            vec![
                ("2024-03-01".into(), "08:00".into()),
                ("2024-03-02".into(), "08:00".into()),
                ("2024-03-02".into(), "13:00".into()),
            ]
        );

        assert_eq!(load_entries_between(&c, Some(d("2024-03-03")), None).unwrap().len(), 1);
        assert_eq!(count_entries(&c).unwrap(), 4);
    }

    #[test]
    fn only_one_timer_row() {
        let c = conn();
        let t = ActiveTimer {
            started_at: Local::now(),
            comment_en: "x".into(),
            comment_nl: String::new(),
        };
        insert_active_timer(&c, &t).unwrap();
        assert!(insert_active_timer(&c, &t).is_err());
        assert!(load_active_timer(&c).unwrap().is_some());
        assert!(delete_active_timer(&c).unwrap());
        assert!(load_active_timer(&c).unwrap().is_none());
    }
}
