use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info};
use crate::utils::path::expand_tilde;
use chrono::Local;

/// Handle the `backup` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let dest = match file {
            Some(f) => expand_tilde(f),
            None => BackupLogic::default_path(Local::now()),
        };

        let target = if *compress {
            dest.with_extension("zip")
        } else {
            dest.clone()
        };

        if target.exists()
            && !confirm(format!("The file '{}' already exists. Overwrite?", target.display()))
        {
            info("Backup cancelled.");
            return Ok(());
        }

        let pool = open_db(&cfg.database)?;
        BackupLogic::backup(&pool, &dest, *compress)?;
    }

    Ok(())
}
