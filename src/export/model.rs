use crate::models::WorkEntry;
use serde::Serialize;

/// Flat export row, one per work entry.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EntryExport {
    pub id: i64,
    pub date: String,
    pub start: String,
    pub end: String,
    pub duration_hours: f64,
    pub materials_cost: f64,
    pub comment_en: String,
    pub comment_nl: String,
    pub photo: String,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl From<&WorkEntry> for EntryExport {
    fn from(e: &WorkEntry) -> Self {
        Self {
            id: e.id,
            date: e.date_str(),
            start: e.start_str(),
            end: e.end_str(),
            duration_hours: round2(e.duration_hours()),
            materials_cost: round2(e.materials_cost),
            comment_en: e.comment_en.clone(),
            comment_nl: e.comment_nl.clone(),
            photo: e.photo.clone().unwrap_or_default(),
        }
    }
}

/// Column headers for CSV / XLSX.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "date",
        "start",
        "end",
        "duration_hours",
        "materials_cost",
        "comment_en",
        "comment_nl",
        "photo",
    ]
}

/// Text cells in header order; hours and cost keep two decimals.
pub(crate) fn entry_to_row(e: &EntryExport) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.date.clone(),
        e.start.clone(),
        e.end.clone(),
        format!("{:.2}", e.duration_hours),
        format!("{:.2}", e.materials_cost),
        e.comment_en.clone(),
        e.comment_nl.clone(),
        e.photo.clone(),
    ]
}
