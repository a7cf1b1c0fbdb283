use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::{BackupLogic, RestoreMode};
use crate::db::initialize::open_db;
use crate::db::queries::count_entries;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info};
use crate::utils::path::expand_tilde;

/// Handle the `restore` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Restore { file, merge, yes } = cmd {
        let src = expand_tilde(file);
        let mode = if *merge {
            RestoreMode::Merge
        } else {
            RestoreMode::Replace
        };

        // fail on unreadable backups before asking anything
        let entries = BackupLogic::read_backup(&src)?;

        if mode == RestoreMode::Replace
            && !*yes
            && !confirm(format!(
                "Replace ALL stored entries with the {} entries in '{}'?",
                entries.len(),
                src.display()
            ))
        {
            info("Restore cancelled.");
            return Ok(());
        }

        let mut pool = open_db(&cfg.database)?;
        BackupLogic::restore(&mut pool, &src, mode)?;
        info(format!("{} entries stored.", count_entries(&pool.conn)?));
    }

    Ok(())
}
