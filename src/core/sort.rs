//! Sort comparators over work entries.

use crate::models::{SortField, SortOptions, SortOrder, WorkEntry};
use std::cmp::Ordering;

fn compare(a: &WorkEntry, b: &WorkEntry, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::StartTime => (a.date, a.start).cmp(&(b.date, b.start)),
        SortField::Duration => a.duration_minutes().cmp(&b.duration_minutes()),
        SortField::Cost => a.materials_cost.total_cmp(&b.materials_cost),
    }
}

/// Stable sort. Descending flips the comparator, so equal keys keep their
/// input order in both directions.
pub fn sort_entries(entries: &mut [WorkEntry], options: SortOptions) {
    entries.sort_by(|a, b| match options.order {
        SortOrder::Asc => compare(a, b, options.field),
        SortOrder::Desc => compare(b, a, options.field),
    });
}
