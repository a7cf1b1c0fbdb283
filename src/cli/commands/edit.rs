use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::EditLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::EntryPatch;
use crate::ui::messages::success;
use crate::utils::date::parse_date_arg;
use crate::utils::time::parse_optional_time;

/// Handle the `edit` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date,
        start,
        end,
        comment_en,
        comment_nl,
        photo,
        clear_photo,
        cost,
    } = cmd
    {
        let patch = EntryPatch {
            date: date.as_deref().map(parse_date_arg).transpose()?,
            start: parse_optional_time(start.as_ref())?,
            end: parse_optional_time(end.as_ref())?,
            comment_en: comment_en.clone(),
            comment_nl: comment_nl.clone(),
            photo: photo.clone(),
            clear_photo: *clear_photo,
            materials_cost: *cost,
        };

        let mut pool = open_db(&cfg.database)?;
        let entry = EditLogic::apply(&mut pool, *id, &patch)?;

        success(format!(
            "✏️ Entry #{} updated: {} {}-{}",
            entry.id,
            entry.date_str(),
            entry.start_str(),
            entry.end_str()
        ));
    }

    Ok(())
}
