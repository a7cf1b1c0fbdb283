use super::{Rates, overtime::{calculate_overtime, overtime_hours}};
use crate::models::{WorkEntry, WorkSummary};

/// Totals, overtime and earnings for `entries`.
///
/// Earnings are `regular * rate + overtime * rate * multiplier` plus the
/// materials cost of every entry.
pub fn calculate_summary(entries: &[WorkEntry], rates: &Rates) -> WorkSummary {
    if entries.is_empty() {
        return WorkSummary::default();
    }

    let total_minutes: i64 = entries.iter().map(WorkEntry::duration_minutes).sum();
    let total_hours = total_minutes as f64 / 60.0;
    let overtime = overtime_hours(entries, rates.weekly_hours);
    let regular = total_hours - overtime;
    let materials: f64 = entries.iter().map(|e| e.materials_cost).sum();

    let weighted = calculate_overtime(entries, rates);
    let earnings = (regular + weighted) * rates.hourly_rate + materials;

    WorkSummary {
        entries: entries.len(),
        total_hours,
        regular_hours: regular,
        overtime_hours: overtime,
        weighted_overtime_hours: weighted,
        materials_cost: materials,
        total_earnings: earnings,
    }
}
