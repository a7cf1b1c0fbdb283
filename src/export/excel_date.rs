use chrono::{NaiveDate, NaiveTime, Timelike};

/// Excel serial day number (1900 date system, epoch 1899-12-30).
pub(crate) fn date_to_excel_serial(d: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN);
    (d - epoch).num_days() as f64
}

/// Fraction of a day, as Excel stores times.
pub(crate) fn time_to_excel_fraction(t: NaiveTime) -> f64 {
    t.num_seconds_from_midnight() as f64 / 86400.0
}
