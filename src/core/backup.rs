//! JSON backup and restore of all work entries.

use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_all_entries, insert_entry, insert_entry_with_id, load_all_entries,
};
use crate::errors::{AppError, AppResult};
use crate::models::WorkEntry;
use crate::ui::messages::{info, success};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub const BACKUP_FORMAT_VERSION: u32 = 1;

/// On-disk layout of a backup file.
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupDocument {
    pub format_version: u32,
    pub created_at: String,
    pub entries: Vec<WorkEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreMode {
    /// Drop every stored entry, then load the backup.
    #[default]
    Replace,
    /// Append the backup to the stored entries with fresh ids.
    Merge,
}

pub struct BackupLogic;

fn backup_err(stage: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Backup(format!("{stage}: {e}"))
}

impl BackupLogic {
    /// `<config dir>/rworklog_backup_<timestamp>.json`
    pub fn default_path(now: DateTime<Local>) -> PathBuf {
        Config::config_dir().join(format!(
            "rworklog_backup_{}.json",
            now.format("%Y-%m-%d_%H-%M-%S")
        ))
    }

    /// Write every entry to `dest`. With `compress`, or when `dest` ends in
    /// `.zip`, the JSON goes into a `.zip` next to `dest` instead. Returns
    /// the path actually written.
    pub fn backup(pool: &DbPool, dest: &Path, compress: bool) -> AppResult<PathBuf> {
        let compress = compress || is_zip_path(dest);
        let entries = load_all_entries(&pool.conn)?;
        let doc = BackupDocument {
            format_version: BACKUP_FORMAT_VERSION,
            created_at: Local::now().to_rfc3339(),
            entries,
        };
        let json = serde_json::to_string_pretty(&doc)?;

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let final_path = if compress {
            let zip_path = dest.with_extension("zip");
            let inner = dest
                .with_extension("json")
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "rworklog_backup.json".to_string());

            let file = fs::File::create(&zip_path)?;
            let mut zip = ZipWriter::new(file);
            let options: FileOptions<'_, ()> =
                FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

            zip.start_file(inner, options)
                .map_err(|e| backup_err("start_file", e))?;
            zip.write_all(json.as_bytes())?;
            zip.finish().map_err(|e| backup_err("finish", e))?;

            info(format!("📦 Compressed: {}", zip_path.display()));
            zip_path
        } else {
            fs::write(dest, &json)?;
            dest.to_path_buf()
        };

        ttlog(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            &format!(
                "{} entries{}",
                doc.entries.len(),
                if compress { " (compressed)" } else { "" }
            ),
        )?;

        success(format!(
            "Backup created: {} ({} entries)",
            final_path.display(),
            doc.entries.len()
        ));
        Ok(final_path)
    }

    /// Parse and validate a backup file without touching the database.
    pub fn read_backup(src: &Path) -> AppResult<Vec<WorkEntry>> {
        if !src.exists() {
            return Err(AppError::Backup(format!(
                "file not found: {}",
                src.display()
            )));
        }

        let raw = if is_zip_path(src) {
            read_json_from_zip(src)?
        } else {
            fs::read_to_string(src)?
        };

        let entries = parse_backup(&raw)?;

        for (i, e) in entries.iter().enumerate() {
            e.validate()
                .map_err(|err| AppError::Backup(format!("entry {} ({}): {err}", i + 1, e.date_str())))?;
        }

        Ok(entries)
    }

    /// Load `src` into the database. Returns the number of restored entries.
    pub fn restore(pool: &mut DbPool, src: &Path, mode: RestoreMode) -> AppResult<usize> {
        let entries = Self::read_backup(src)?;
        let now = Local::now().to_rfc3339();

        let prepared: Vec<WorkEntry> = entries
            .iter()
            .cloned()
            .map(|mut e| {
                if e.created_at.is_empty() {
                    e.created_at = now.clone();
                }
                if e.updated_at.is_empty() {
                    e.updated_at = e.created_at.clone();
                }
                e
            })
            .collect();

        // Replace keeps the first occurrence of every positive id; the rest
        // are inserted afterwards so fresh ids cannot collide with kept ones.
        let (keep_ids, fresh): (Vec<WorkEntry>, Vec<WorkEntry>) = match mode {
            RestoreMode::Replace => {
                let mut used_ids = HashSet::new();
                prepared
                    .into_iter()
                    .partition(|e| e.id > 0 && used_ids.insert(e.id))
            }
            RestoreMode::Merge => (Vec::new(), prepared),
        };

        let count = pool.with_transaction(|tx| {
            if mode == RestoreMode::Replace {
                delete_all_entries(tx)?;
            }

            for e in &keep_ids {
                insert_entry_with_id(tx, e)?;
            }
            for e in &fresh {
                insert_entry(tx, e)?;
            }

            ttlog(
                tx,
                "restore",
                &src.to_string_lossy(),
                &format!(
                    "{} entries ({})",
                    entries.len(),
                    match mode {
                        RestoreMode::Replace => "replace",
                        RestoreMode::Merge => "merge",
                    }
                ),
            )?;

            Ok::<_, AppError>(entries.len())
        })?;

        success(format!("Restored {} entries from {}", count, src.display()));
        Ok(count)
    }
}

/// Accept the versioned document or a bare array of entries.
fn parse_backup(raw: &str) -> AppResult<Vec<WorkEntry>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }

    let version = value
        .get("format_version")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| AppError::Backup("missing 'format_version'".into()))?;

    if version > BACKUP_FORMAT_VERSION as u64 {
        return Err(AppError::Backup(format!(
            "unsupported format_version {version} (max {BACKUP_FORMAT_VERSION})"
        )));
    }

    let doc: BackupDocument = serde_json::from_value(value)?;
    Ok(doc.entries)
}

fn is_zip_path(p: &Path) -> bool {
    p.extension().is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

fn read_json_from_zip(src: &Path) -> AppResult<String> {
    let file = fs::File::open(src)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| backup_err("open zip", e))?;

    for i in 0..archive.len() {
        let mut f = archive.by_index(i).map_err(|e| backup_err("read zip", e))?;
        if f.name().to_lowercase().ends_with(".json") {
            let mut out = String::new();
            f.read_to_string(&mut out)?;
            return Ok(out);
        }
    }

    Err(AppError::Backup(format!(
        "no .json file inside {}",
        src.display()
    )))
}
