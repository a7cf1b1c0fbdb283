use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{date_to_excel_serial, time_to_excel_fraction};
use crate::export::model::{entry_to_row, get_headers};
use crate::export::{EntryExport, notify_export_success};
use crate::ui::messages::info;
use chrono::{NaiveDate, NaiveTime};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const COL_HOURS: u16 = 4;
const COL_COST: u16 = 5;

/// Styled workbook: coloured header, banded rows, typed date / time / number
/// cells and a totals row.
pub(crate) fn export_xlsx(entries: &[EntryExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Work entries").map_err(to_app_error)?;

    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_app_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, e) in entries.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        write_entry_row(worksheet, row, e, band)?;

        for (col, value) in entry_to_row(e).iter().enumerate() {
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    // totals
    let total_row = (entries.len() + 1) as u32;
    let total_format = Format::new()
        .set_bold()
        .set_num_format("0.00")
        .set_border(FormatBorder::Thin);

    worksheet
        .write_with_format(total_row, 0, "Total", &total_format)
        .map_err(to_app_error)?;
    for col in [COL_HOURS, COL_COST] {
        let letter = (b'A' + col as u8) as char;
        let formula = format!("=SUM({letter}2:{letter}{total_row})");
        worksheet
            .write_formula_with_format(total_row, col, formula.as_str(), &total_format)
            .map_err(to_app_error)?;
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, (*w).min(60) as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn cell_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_entry_row(ws: &mut Worksheet, row: u32, e: &EntryExport, bg: Color) -> AppResult<()> {
    let text = cell_format(bg);
    let number = cell_format(bg).set_align(FormatAlign::Right).set_num_format("0.00");
    let date_fmt = cell_format(bg).set_num_format("yyyy-mm-dd");
    let time_fmt = cell_format(bg).set_num_format("hh:mm");

    ws.write_with_format(row, 0, e.id as f64, &cell_format(bg).set_align(FormatAlign::Right))
        .map_err(to_app_error)?;

    match NaiveDate::parse_from_str(&e.date, "%Y-%m-%d") {
        Ok(d) => ws.write_with_format(row, 1, date_to_excel_serial(d), &date_fmt),
        Err(_) => ws.write_with_format(row, 1, e.date.as_str(), &text),
    }
    .map_err(to_app_error)?;

    for (col, raw) in [(2u16, &e.start), (3u16, &e.end)] {
        match NaiveTime::parse_from_str(raw, "%H:%M") {
            Ok(t) => ws.write_with_format(row, col, time_to_excel_fraction(t), &time_fmt),
            Err(_) => ws.write_with_format(row, col, raw.as_str(), &text),
        }
        .map_err(to_app_error)?;
    }

    ws.write_with_format(row, COL_HOURS, e.duration_hours, &number)
        .map_err(to_app_error)?;
    ws.write_with_format(row, COL_COST, e.materials_cost, &number)
        .map_err(to_app_error)?;
    ws.write_with_format(row, 6, e.comment_en.as_str(), &text)
        .map_err(to_app_error)?;
    ws.write_with_format(row, 7, e.comment_nl.as_str(), &text)
        .map_err(to_app_error)?;
    ws.write_with_format(row, 8, e.photo.as_str(), &text)
        .map_err(to_app_error)?;

    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
