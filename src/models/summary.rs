use serde::Serialize;

/// Totals over a selection of work entries.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct WorkSummary {
    pub entries: usize,
    pub total_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    /// Overtime hours multiplied by the overtime multiplier.
    pub weighted_overtime_hours: f64,
    pub materials_cost: f64,
    pub total_earnings: f64,
}

/// Worked minutes of a single ISO week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekTotal {
    pub iso_year: i32,
    pub week: u32,
    pub minutes: i64,
}
