use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::initialize::open_db;
use crate::db::queries::load_entry;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info, success};

/// Handle the `del` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut pool = open_db(&cfg.database)?;

        let entry = load_entry(&pool.conn, *id)?.ok_or(AppError::EntryNotFound(*id))?;

        if !*yes {
            let prompt = format!(
                "Delete entry #{} ({} {}-{})?",
                entry.id,
                entry.date_str(),
                entry.start_str(),
                entry.end_str()
            );
            if !confirm(prompt) {
                info("Deletion cancelled.");
                return Ok(());
            }
        }

        DeleteLogic::apply(&mut pool, *id)?;
        success(format!("🗑️ Entry #{} deleted.", id));
    }

    Ok(())
}
