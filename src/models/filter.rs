use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Named relative date windows (persisted as `default_filter` in the config).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPreset {
    #[default]
    All,
    Today,
    ThisWeek,
    ThisMonth,
}

impl FilterPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterPreset::All => "all",
            FilterPreset::Today => "today",
            FilterPreset::ThisWeek => "this-week",
            FilterPreset::ThisMonth => "this-month",
        }
    }
}

/// Predicates applied by `list`, `summary` and `export`.
/// Every `None`/`false` field means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub week_number: Option<u32>,
    pub search: Option<String>,
    pub overtime_only: bool,
    pub with_photo_only: bool,
}

impl FilterOptions {
    pub fn has_date_bounds(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}
