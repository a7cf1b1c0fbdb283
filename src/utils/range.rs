//! Parse `--period` / `--range` expressions into inclusive date bounds.
//!
//! Supported:
//! - `all` (no bounds)
//! - YYYY
//! - YYYY-MM
//! - YYYY-MM-DD
//! - YYYY:YYYY
//! - YYYY-MM:YYYY-MM
//! - YYYY-MM-DD:YYYY-MM-DD

use crate::errors::{AppError, AppResult};
use crate::utils::date::last_day_of_month;
use chrono::NaiveDate;

fn bad(msg: &str, input: &str) -> AppError {
    AppError::InvalidRange(format!("{msg} in '{input}'"))
}

/// First and last day covered by a single period token.
fn period_bounds(p: &str, input: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| bad("invalid year", input))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| bad("invalid year", input))?;
            let d2 =
                NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| bad("invalid year", input))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            if p.as_bytes().get(4) != Some(&b'-') {
                return Err(bad("invalid month", input));
            }
            let y: i32 = p[0..4].parse().map_err(|_| bad("invalid year", input))?;
            let m: u32 = p[5..7].parse().map_err(|_| bad("invalid month", input))?;
            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| bad("invalid month", input))?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last_day_of_month(y, m))
                .ok_or_else(|| bad("invalid month", input))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| bad("invalid date", input))?;
            Ok((d, d))
        }
        _ => Err(bad("unsupported format", input)),
    }
}

/// `None` for `all`, otherwise inclusive `(start, end)`.
pub fn parse_range(r: &str) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let r = r.trim();

    if r.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(bad("start and end must have the same format", r));
        }

        let (d1, _) = period_bounds(start, r)?;
        let (_, d2) = period_bounds(end, r)?;

        if d2 < d1 {
            return Err(bad("end is before start", r));
        }

        return Ok(Some((d1, d2)));
    }

    period_bounds(r, r).map(Some)
}

/// Human-readable title used by reports.
pub fn describe_range(range: Option<&str>) -> String {
    let Some(p) = range.map(str::trim) else {
        return "Work entries".to_string();
    };

    if p.eq_ignore_ascii_case("all") {
        return "Work entries".to_string();
    }

    if let Some((a, b)) = p.split_once(':') {
        return format!("Work entries from {} to {}", a.trim(), b.trim());
    }

    match p.len() {
        4 => format!("Work entries for year {}", p),
        7 => format!(
            "Work entries for {} {}",
            crate::utils::date::month_name(&p[5..7]),
            &p[0..4]
        ),
        10 => format!("Work entries for {}", p),
        _ => "Work entries".to_string(),
    }
}
