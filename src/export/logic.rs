use crate::config::Config;
use crate::core::calculator::calculate_summary;
use crate::core::select::{Selection, select_entries};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_absolute, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EntryExport;
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::range::describe_range;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// High-level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the entries picked by `selection` to `file`.
    ///
    /// `file` must be absolute. Returns `None` when nothing matched and no
    /// file was written.
    pub fn export(
        pool: &DbPool,
        cfg: &Config,
        format: ExportFormat,
        file: &str,
        selection: &Selection,
        force: bool,
        today: NaiveDate,
    ) -> AppResult<Option<PathBuf>> {
        let path = Path::new(file);

        ensure_absolute(path)?;

        let entries = select_entries(pool, cfg, selection, today)?;

        if entries.is_empty() {
            warning("No work entries found for the selected range.");
            return Ok(None);
        }

        ensure_writable(path, force)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let rows: Vec<EntryExport> = entries.iter().map(EntryExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
            ExportFormat::Pdf => {
                let title = describe_range(selection.range.as_deref());
                let summary = calculate_summary(&entries, &cfg.rates());
                export_pdf(&rows, path, &title, &summary, cfg.language, &cfg.currency)?
            }
        }

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} entries as {}", rows.len(), format.as_str()),
        )?;

        Ok(Some(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::add::AddLogic;
    use crate::db::initialize::init_db;
    use crate::models::WorkEntry;
    use crate::errors::AppError;
    use chrono::NaiveTime;

    fn seeded() -> DbPool {
        let mut p = DbPool::in_memory().unwrap();
        init_db(&p.conn).unwrap();
        let e = WorkEntry::new(
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
        )
        .with_comments("Gutter, front side", "Dakgoot");
        AddLogic::apply(&mut p, &e).unwrap();
        p
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn relative_path_is_rejected() {
        let p = seeded();
        let res = ExportLogic::export(
            &p,
            &Config::default(),
            ExportFormat::Csv,
            "out.csv",
            &Selection::default(),
            true,
            today(),
        );
        assert!(matches!(res, Err(AppError::Export(_))));
    }

    #[test]
    fn csv_has_header_and_quoted_comment() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let p = seeded();

        let written = ExportLogic::export(
            &p,
            &Config::default(),
            ExportFormat::Csv,
            out.to_str().unwrap(),
            &Selection::default(),
            true,
            today(),
        )
        .unwrap();
        assert_eq!(written.as_deref(), Some(out.as_path()));

        let content = std::fs::read_to_string(&out).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,date,start,end,duration_hours,materials_cost,comment_en,comment_nl,photo"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,2024-06-03,08:00,12:30,4.50,0.00,\"Gutter, front side\",Dakgoot,"
        );
    }

    #[test]
    fn empty_selection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("none.json");
        let p = seeded();
        let sel = Selection {
            range: Some("2023".into()),
            ..Default::default()
        };

        let written = ExportLogic::export(
            &p,
            &Config::default(),
            ExportFormat::Json,
            out.to_str().unwrap(),
            &sel,
            true,
            today(),
        )
        .unwrap();
        assert!(written.is_none());
        assert!(!out.exists());
    }

    #[test]
    fn xlsx_and_pdf_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let p = seeded();
        for (format, name) in [(ExportFormat::Xlsx, "o.xlsx"), (ExportFormat::Pdf, "o.pdf")] {
            let out = dir.path().join(name);
            ExportLogic::export(
                &p,
                &Config::default(),
                format,
                out.to_str().unwrap(),
                &Selection::default(),
                true,
                today(),
            )
            .unwrap();
            assert!(std::fs::metadata(&out).unwrap().len() > 0);
        }
    }
}
