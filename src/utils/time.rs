//! Time utilities: parsing HH:MM, formatting minutes.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// Accepts `HH:MM` and `H:MM`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_time_arg(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    input.map(|s| parse_time_arg(s)).transpose()
}
