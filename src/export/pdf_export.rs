use crate::errors::{AppError, AppResult};
use crate::export::pdf::PdfManager;
use crate::export::{EntryExport, notify_export_success};
use crate::models::{Language, WorkSummary};
use crate::ui::messages::info;
use crate::utils::formatting::{hours2, money, truncate};
use std::path::Path;

const PDF_HEADERS: [&str; 7] = ["id", "date", "start", "end", "hours", "cost", "comment"];
const COMMENT_WIDTH: usize = 30;

fn pdf_row(e: &EntryExport, lang: Language) -> Vec<String> {
    let comment = match lang {
        Language::En if !e.comment_en.trim().is_empty() => &e.comment_en,
        Language::Nl if !e.comment_nl.trim().is_empty() => &e.comment_nl,
        Language::En => &e.comment_nl,
        Language::Nl => &e.comment_en,
    };

    vec![
        e.id.to_string(),
        e.date.clone(),
        e.start.clone(),
        e.end.clone(),
        hours2(e.duration_hours),
        format!("{:.2}", e.materials_cost),
        truncate(comment, COMMENT_WIDTH),
    ]
}

fn summary_lines(s: &WorkSummary, currency: &str) -> Vec<(String, String)> {
    vec![
        ("Entries".into(), s.entries.to_string()),
        ("Total hours".into(), hours2(s.total_hours)),
        ("Regular hours".into(), hours2(s.regular_hours)),
        ("Overtime hours".into(), hours2(s.overtime_hours)),
        ("Materials".into(), money(s.materials_cost, currency)),
        ("Total earnings".into(), money(s.total_earnings, currency)),
    ]
}

pub(crate) fn export_pdf(
    entries: &[EntryExport],
    path: &Path,
    title: &str,
    summary: &WorkSummary,
    lang: Language,
    currency: &str,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let rows: Vec<Vec<String>> = entries.iter().map(|e| pdf_row(e, lang)).collect();

    let mut pdf = PdfManager::new();
    pdf.write_report(title, &PDF_HEADERS, &rows, &summary_lines(summary, currency));

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
