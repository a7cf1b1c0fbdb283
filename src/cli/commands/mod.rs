pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod restore;
pub mod summary;
pub mod timer;

use crate::cli::parser::SelectionArgs;
use crate::config::Config;
use crate::core::select::Selection;
use crate::errors::AppResult;
use crate::models::{FilterOptions, SortOptions};
use crate::utils::date::parse_date_arg;

impl SelectionArgs {
    /// Resolve CLI flags into a `Selection`, filling sort defaults from `cfg`.
    pub fn to_selection(&self, cfg: &Config) -> AppResult<Selection> {
        let start_date = self.from.as_deref().map(parse_date_arg).transpose()?;
        let end_date = self.to.as_deref().map(parse_date_arg).transpose()?;

        let defaults = cfg.sort_options();

        Ok(Selection {
            range: self.period.clone(),
            preset: self.filter,
            filter: FilterOptions {
                start_date,
                end_date,
                week_number: self.week,
                search: self.search.clone(),
                overtime_only: self.overtime,
                with_photo_only: self.photos,
            },
            sort: SortOptions {
                field: self.sort.unwrap_or(defaults.field),
                order: self.order.unwrap_or(defaults.order),
            },
        })
    }
}
