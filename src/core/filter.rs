//! Filter predicates over work entries.

use crate::core::calculator::overtime_weeks;
use crate::models::{FilterOptions, FilterPreset, WorkEntry};
use crate::utils::date::{iso_week_bounds, month_bounds};
use chrono::{Datelike, NaiveDate};

impl FilterPreset {
    /// Date window of the preset relative to `today` (inclusive bounds).
    pub fn resolve(&self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match self {
            FilterPreset::All => (None, None),
            FilterPreset::Today => (Some(today), Some(today)),
            FilterPreset::ThisWeek => {
                let (mon, sun) = iso_week_bounds(today);
                (Some(mon), Some(sun))
            }
            FilterPreset::ThisMonth => {
                let (first, last) = month_bounds(today);
                (Some(first), Some(last))
            }
        }
    }
}

/// Keep the entries matching every predicate set in `options`, preserving order.
///
/// `overtime_only` looks at the ISO week totals of the whole input slice.
pub fn apply_filter(
    entries: &[WorkEntry],
    options: &FilterOptions,
    weekly_hours: f64,
) -> Vec<WorkEntry> {
    let overtime = if options.overtime_only {
        Some(overtime_weeks(entries, weekly_hours))
    } else {
        None
    };

    let needle = options
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    entries
        .iter()
        .filter(|e| options.start_date.is_none_or(|s| e.date >= s))
        .filter(|e| options.end_date.is_none_or(|end| e.date <= end))
        .filter(|e| options.week_number.is_none_or(|w| e.date.iso_week().week() == w))
        .filter(|e| match &needle {
            Some(n) => {
                e.comment_en.to_lowercase().contains(n) || e.comment_nl.to_lowercase().contains(n)
            }
            None => true,
        })
        .filter(|e| match &overtime {
            Some(weeks) => {
                let w = e.date.iso_week();
                weeks.contains(&(w.year(), w.week()))
            }
            None => true,
        })
        .filter(|e| !options.with_photo_only || e.has_photo())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(id: i64, date: &str, start: &str, end: &str) -> WorkEntry {
        let mut e = WorkEntry::new(
            d(date),
            NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        );
        e.id = id;
        e
    }

    fn ids(v: &[WorkEntry]) -> Vec<i64> {
        v.iter().map(|e| e.id).collect()
    }

    fn sample() -> Vec<WorkEntry> {
        vec![
            entry(1, "2024-01-01", "08:00", "18:00").with_comments("Kitchen tiles", "Keuken tegels"),
            entry(2, "2024-01-02", "08:00", "18:00").with_photo(Some("/p/1.jpg".into())),
            entry(3, "2024-01-03", "08:00", "18:00"),
            entry(4, "2024-01-04", "08:00", "18:00").with_comments("", "Badkamer"),
            entry(5, "2024-01-05", "08:00", "12:00"),
            entry(6, "2024-01-10", "09:00", "10:00").with_comments("kitchen cleanup", ""),
            entry(7, "2024-02-01", "09:00", "10:00").with_photo(Some("  ".into())),
        ]
    }

    #[test]
    fn empty_options_keep_everything() {
        let all = sample();
        assert_eq!(apply_filter(&all, &FilterOptions::default(), 40.0), all);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let opts = FilterOptions {
            start_date: Some(d("2024-01-02")),
            end_date: Some(d("2024-01-05")),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&sample(), &opts, 40.0)), vec![2, 3, 4, 5]);

        let open_end = FilterOptions {
            start_date: Some(d("2024-01-10")),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&sample(), &open_end, 40.0)), vec![6, 7]);
    }

    #[test]
    fn week_number_and_search() {
        let week2 = FilterOptions {
            week_number: Some(2),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&sample(), &week2, 40.0)), vec![6]);

        let search = FilterOptions {
            search: Some("KITCHEN".into()),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&sample(), &search, 40.0)), vec![1, 6]);

        let dutch = FilterOptions {
            search: Some("badkamer".into()),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&sample(), &dutch, 40.0)), vec![4]);
    }

    #[test]
    fn overtime_only_keeps_entries_of_overtime_weeks() {
        // week 1 has 44h, week 2 has 1h
        let opts = FilterOptions {
            overtime_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&sample(), &opts, 40.0)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn blank_photo_does_not_count() {
        let opts = FilterOptions {
            with_photo_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&sample(), &opts, 40.0)), vec![2]);
    }

    #[test]
    fn presets_resolve_relative_to_today() {
        let today = d("2024-01-03");
        assert_eq!(FilterPreset::All.resolve(today), (None, None));
        assert_eq!(FilterPreset::Today.resolve(today), (Some(today), Some(today)));
        assert_eq!(
            FilterPreset::ThisWeek.resolve(today),
            (Some(d("2024-01-01")), Some(d("2024-01-07")))
        );
        assert_eq!(
            FilterPreset::ThisMonth.resolve(today),
            (Some(d("2024-01-01")), Some(d("2024-01-31")))
        );
    }
}
