use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::WorkEntry;
use crate::ui::messages::success;
use crate::utils::date::parse_date_arg;
use crate::utils::mins2readable;
use crate::utils::time::parse_time_arg;

/// Handle the `add` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        start,
        end,
        comment_en,
        comment_nl,
        photo,
        cost,
    } = cmd
    {
        let date = parse_date_arg(date)?;
        let start = parse_time_arg(start)?;
        let end = parse_time_arg(end)?;

        let entry = WorkEntry::new(date, start, end)
            .with_comments(
                comment_en.clone().unwrap_or_default(),
                comment_nl.clone().unwrap_or_default(),
            )
            .with_photo(photo.clone())
            .with_cost(cost.unwrap_or(0.0));

        let mut pool = open_db(&cfg.database)?;
        let id = AddLogic::apply(&mut pool, &entry)?;

        success(format!(
            "Entry #{} added: {} {}-{} ({})",
            id,
            entry.date_str(),
            entry.start_str(),
            entry.end_str(),
            mins2readable(entry.duration_minutes())
        ));
    }

    Ok(())
}
