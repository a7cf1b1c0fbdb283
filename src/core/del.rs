use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_entry, load_entry};
use crate::errors::{AppError, AppResult};
use crate::models::WorkEntry;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete entry `id`, returning the removed row.
    pub fn apply(pool: &mut DbPool, id: i64) -> AppResult<WorkEntry> {
        pool.with_transaction(|tx| {
            let entry = load_entry(tx, id)?.ok_or(AppError::EntryNotFound(id))?;

            delete_entry(tx, id)?;
            ttlog(
                tx,
                "del",
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
