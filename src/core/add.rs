use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::insert_entry;
use crate::errors::AppResult;
use crate::models::WorkEntry;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Validate and store `entry`, returning the id assigned by the database.
    pub fn apply(pool: &mut DbPool, entry: &WorkEntry) -> AppResult<i64> {
        entry.validate()?;

        pool.with_transaction(|tx| {
            let id = insert_entry(tx, entry)?;
            ttlog(
                tx,
                "add",
                &format!("#{id}"),
                &format!(
                    "{} {}-{} ({} min)",
                    entry.date_str(),
                    entry.start_str(),
                    entry.end_str(),
                    entry.duration_minutes()
                ),
            )?;
            Ok(id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::{count_entries, load_entry};
    use crate::errors::AppError;
    use chrono::{NaiveDate, NaiveTime};

    fn pool() -> DbPool {
        let p = DbPool::in_memory().unwrap();
        init_db(&p.conn).unwrap();
        p
    }

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn stores_entry_and_writes_log() {
        let mut p = pool();
        let e = WorkEntry::new(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(), t("08:00"), t("16:30"))
            .with_comments("Roof repair", "Dakreparatie")
            .with_cost(42.0);

        let id = AddLogic::apply(&mut p, &e).unwrap();
        let stored = load_entry(&p.conn, id).unwrap().unwrap();
        assert_eq!(stored.comment_en, "Roof repair");
        assert_eq!(stored.materials_cost, 42.0);

        let logged: i64 = p
            .conn
            .query_row("SELECT COUNT(*) FROM log WHERE operation = 'add'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(logged, 1);
    }

    #[test]
    fn invalid_entry_is_not_stored() {
        let mut p = pool();
        let e = WorkEntry::new(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(), t("16:00"), t("08:00"));
        assert!(matches!(
            AddLogic::apply(&mut p, &e),
            Err(AppError::InvalidInterval { .. })
        ));
        assert_eq!(count_entries(&p.conn).unwrap(), 0);
    }
}
