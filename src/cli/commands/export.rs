use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date::today;

/// Handle the `export` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        selection,
        force,
    } = cmd
    {
        let sel = selection.to_selection(cfg)?;
        let pool = open_db(&cfg.database)?;
        ExportLogic::export(&pool, cfg, *format, file, &sel, *force, today())?;
    }

    Ok(())
}
