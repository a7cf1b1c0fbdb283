use super::Rates;
use crate::models::{WeekTotal, WorkEntry};
use chrono::Datelike;
use std::collections::{BTreeMap, HashSet};

/// Worked minutes per ISO week (Monday start), ordered by (iso year, week).
pub fn weekly_minutes(entries: &[WorkEntry]) -> Vec<WeekTotal> {
    let mut weeks: BTreeMap<(i32, u32), i64> = BTreeMap::new();

    for e in entries {
        let w = e.date.iso_week();
        *weeks.entry((w.year(), w.week())).or_insert(0) += e.duration_minutes();
    }

    weeks
        .into_iter()
        .map(|((iso_year, week), minutes)| WeekTotal {
            iso_year,
            week,
            minutes,
        })
        .collect()
}

/// ISO weeks whose total exceeds `weekly_hours`.
pub fn overtime_weeks(entries: &[WorkEntry], weekly_hours: f64) -> HashSet<(i32, u32)> {
    weekly_minutes(entries)
        .into_iter()
        .filter(|w| w.minutes as f64 / 60.0 > weekly_hours)
        .map(|w| (w.iso_year, w.week))
        .collect()
}

/// Hours above the weekly threshold, summed over all ISO weeks.
pub fn overtime_hours(entries: &[WorkEntry], weekly_hours: f64) -> f64 {
    weekly_minutes(entries)
        .iter()
        .map(|w| (w.minutes as f64 / 60.0 - weekly_hours).max(0.0))
        .sum()
}

/// Overtime hours weighted by the overtime multiplier.
pub fn calculate_overtime(entries: &[WorkEntry], rates: &Rates) -> f64 {
    overtime_hours(entries, rates.weekly_hours) * rates.overtime_multiplier
}
