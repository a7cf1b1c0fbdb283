use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_entry, update_entry};
use crate::errors::{AppError, AppResult};
use crate::models::{EntryPatch, WorkEntry};
use chrono::Local;

pub struct EditLogic;

impl EditLogic {
    /// Apply `patch` to entry `id` and return the updated entry.
    ///
    /// The patched entry is validated as a whole, so moving only `--in`
    /// past the stored end time is rejected just like on `add`.
    pub fn apply(pool: &mut DbPool, id: i64, patch: &EntryPatch) -> AppResult<WorkEntry> {
        if patch.is_empty() {
            return Err(AppError::Other(
                "Nothing to do: specify at least one field to change.".into(),
            ));
        }

        pool.with_transaction(|tx| {
            let mut entry = load_entry(tx, id)?.ok_or(AppError::EntryNotFound(id))?;

            patch.apply_to(&mut entry);
            entry.validate()?;
            entry.updated_at = Local::now().to_rfc3339();

            update_entry(tx, &entry)?;
            ttlog(
                tx,
                "edit",
                &format!("#{id}"),
                &format!(
                    "{} {}-{}",
                    entry.date_str(),
                    entry.start_str(),
                    entry.end_str()
                ),
            )?;

            Ok(entry)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::add::AddLogic;
    use crate::db::initialize::init_db;
    use chrono::{NaiveDate, NaiveTime};

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn seeded() -> (DbPool, i64) {
        let mut p = DbPool::in_memory().unwrap();
        init_db(&p.conn).unwrap();
        let e = WorkEntry::new(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(), t("08:00"), t("12:00"))
            .with_photo(Some("/photos/a.jpg".into()));
        let id = AddLogic::apply(&mut p, &e).unwrap();
        (p, id)
    }

    #[test]
    fn only_given_fields_change() {
        let (mut p, id) = seeded();
        let patch = EntryPatch {
            end: Some(t("13:15")),
            comment_nl: Some("Schuren".into()),
            ..Default::default()
        };

        let e = EditLogic::apply(&mut p, id, &patch).unwrap();
        assert_eq!(e.start_str(), "08:00");
        assert_eq!(e.end_str(), "13:15");
        assert_eq!(e.comment_nl, "Schuren");
        assert!(e.has_photo());
    }

    #[test]
    fn rejects_interval_that_becomes_inverted() {
        let (mut p, id) = seeded();
        let patch = EntryPatch {
            start: Some(t("14:00")),
            ..Default::default()
        };
        assert!(matches!(
            EditLogic::apply(&mut p, id, &patch),
            Err(AppError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn missing_entry_and_empty_patch() {
        let (mut p, _) = seeded();
        let patch = EntryPatch {
            clear_photo: true,
            ..Default::default()
        };
        assert!(matches!(
            EditLogic::apply(&mut p, 999, &patch),
            Err(AppError::EntryNotFound(999))
        ));
        assert!(EditLogic::apply(&mut p, 1, &EntryPatch::default()).is_err());
    }
}
