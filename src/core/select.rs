//! Shared entry selection for `list`, `summary` and `export`:
//! period / preset → storage query → filter predicates → sort.

use crate::config::Config;
use crate::core::calculator::{overtime_weeks, weekly_minutes};
use crate::core::filter::apply_filter;
use crate::core::sort::sort_entries;
use crate::db::pool::DbPool;
use crate::db::queries::load_entries_between;
use crate::errors::AppResult;
use crate::models::{FilterOptions, FilterPreset, SortOptions, WeekTotal, WorkEntry};
use crate::utils::date::iso_week_bounds;
use crate::utils::range::parse_range;
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// `--period` / `--range` expression.
    pub range: Option<String>,
    /// Explicit preset; the configured default applies when neither this nor `range` is set.
    pub preset: Option<FilterPreset>,
    pub filter: FilterOptions,
    pub sort: SortOptions,
}

impl Selection {
    /// Date bounds after resolving range, preset and configured default.
    pub fn resolve_bounds(
        &self,
        cfg: &Config,
        today: NaiveDate,
    ) -> AppResult<(Option<NaiveDate>, Option<NaiveDate>)> {
        if let Some(r) = &self.range {
            return Ok(match parse_range(r)? {
                Some((a, b)) => (Some(a), Some(b)),
                None => (None, None),
            });
        }

        if let Some(p) = self.preset {
            return Ok(p.resolve(today));
        }

        if self.filter.has_date_bounds() {
            return Ok((self.filter.start_date, self.filter.end_date));
        }

        Ok(cfg.default_filter.resolve(today))
    }
}

/// Requested window: resolved bounds narrowed by explicit `--from/--to`.
fn window(
    cfg: &Config,
    sel: &Selection,
    today: NaiveDate,
) -> AppResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    let (from, to) = sel.resolve_bounds(cfg, today)?;

    let from = match (from, sel.filter.start_date) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    };
    let to = match (to, sel.filter.end_date) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    Ok((from, to))
}

/// Every entry of the ISO weeks touched by `from..=to`.
fn load_whole_weeks(
    pool: &DbPool,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> AppResult<Vec<WorkEntry>> {
    let load_from = from.map(|d| iso_week_bounds(d).0);
    let load_to = to.map(|d| iso_week_bounds(d).1);
    load_entries_between(&pool.conn, load_from, load_to)
}

/// Load, filter and sort entries according to `sel`.
pub fn select_entries(
    pool: &DbPool,
    cfg: &Config,
    sel: &Selection,
    today: NaiveDate,
) -> AppResult<Vec<WorkEntry>> {
    let (from, to) = window(cfg, sel, today)?;

    // Overtime detection needs complete weeks; the date predicates trim
    // the result back to the requested window.
    let loaded = load_whole_weeks(pool, from, to)?;

    let options = FilterOptions {
        start_date: from,
        end_date: to,
        ..sel.filter.clone()
    };

    let mut out = apply_filter(&loaded, &options, cfg.weekly_hours);
    sort_entries(&mut out, sel.sort);
    Ok(out)
}

/// Totals of the ISO weeks the window touches, counting days outside it.
pub fn whole_week_totals(
    pool: &DbPool,
    cfg: &Config,
    sel: &Selection,
    today: NaiveDate,
) -> AppResult<Vec<WeekTotal>> {
    let (from, to) = window(cfg, sel, today)?;
    Ok(weekly_minutes(&load_whole_weeks(pool, from, to)?))
}

/// ISO weeks touched by the window whose complete total exceeds the weekly hours.
pub fn overtime_weeks_in_window(
    pool: &DbPool,
    cfg: &Config,
    sel: &Selection,
    today: NaiveDate,
) -> AppResult<HashSet<(i32, u32)>> {
    let (from, to) = window(cfg, sel, today)?;
    Ok(overtime_weeks(
        &load_whole_weeks(pool, from, to)?,
        cfg.weekly_hours,
    ))
}
