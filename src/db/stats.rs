use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::mins2readable;
use rusqlite::OptionalExtension;
use std::fs;

/// Aggregates shown by `db --info`.
#[derive(Debug, Default, PartialEq)]
pub struct DbStats {
    pub entries: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub total_minutes: i64,
    pub with_photo: i64,
}

pub fn collect_stats(pool: &DbPool) -> AppResult<DbStats> {
    let conn = &pool.conn;

    let (entries, total_minutes, with_photo): (i64, i64, i64) = conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM((strftime('%s', end_time) - strftime('%s', start_time)) / 60), 0),
                COALESCE(SUM(CASE WHEN photo IS NOT NULL AND trim(photo) <> '' THEN 1 ELSE 0 END), 0)
           FROM work_entries",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    let first_date: Option<String> = conn
        .query_row("SELECT MIN(date) FROM work_entries", [], |row| row.get(0))
        .optional()?
        .flatten();

    let last_date: Option<String> = conn
        .query_row("SELECT MAX(date) FROM work_entries", [], |row| row.get(0))
        .optional()?
        .flatten();

    Ok(DbStats {
        entries,
        first_date,
        last_date,
        total_minutes,
        with_photo,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let stats = collect_stats(pool)?;

    //
    // 2) TOTALS
    //
    println!(
        "{}• Work entries:{} {}{}{}",
        CYAN, RESET, GREEN, stats.entries, RESET
    );
    println!(
        "{}• Total worked:{} {}",
        CYAN,
        RESET,
        mins2readable(stats.total_minutes)
    );
    println!("{}• With photo:{} {}", CYAN, RESET, stats.with_photo);

    //
    // 3) DATE RANGE
    //
    let grey_dash = || format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        stats.first_date.clone().unwrap_or_else(grey_dash)
    );
    println!(
        "    to:   {}",
        stats.last_date.clone().unwrap_or_else(grey_dash)
    );

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    #[test]
    fn stats_of_empty_and_filled_db() {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        assert_eq!(collect_stats(&pool).unwrap(), DbStats::default());

        pool.conn
            .execute_batch(
                "INSERT INTO work_entries (date, start_time, end_time, photo, created_at)
                 VALUES ('2024-01-02', '09:00', '17:30', '/p.jpg', 'x'),
                        ('2024-01-05', '08:00', '09:15', NULL, 'x');",
            )
            .unwrap();

        let s = collect_stats(&pool).unwrap();
        assert_eq!(s.entries, 2);
        assert_eq!(s.total_minutes, 510 + 75);
        assert_eq!(s.with_photo, 1);
        assert_eq!(s.first_date.as_deref(), Some("2024-01-02"));
        assert_eq!(s.last_date.as_deref(), Some("2024-01-05"));
    }
}
