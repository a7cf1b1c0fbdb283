use crate::config::Config;
use crate::config::migrate::{add_missing_keys, missing_keys, set_key, unknown_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        let yaml = serde_yaml::to_string(cfg)
            .map_err(|e| AppError::Config(format!("serialize error: {e}")))?;
        println!("📄 Current configuration:\n");
        println!("{yaml}");
        Ok(())
    }

    /// Report missing / unknown keys and invalid values. Returns `true` when clean.
    pub fn check(path: &Path, cfg: &Config) -> AppResult<bool> {
        let mut clean = true;

        if path.exists() {
            let missing = missing_keys(path)?;
            if !missing.is_empty() {
                clean = false;
                warning(format!(
                    "Missing keys (defaults in use): {}. Run `config --migrate` to add them.",
                    missing.join(", ")
                ));
            }

            let unknown = unknown_keys(path)?;
            if !unknown.is_empty() {
                warning(format!("Unknown keys ignored: {}", unknown.join(", ")));
            }
        } else {
            clean = false;
            warning(format!(
                "Configuration file not found: {} (defaults in use). Run `init` to create it.",
                path.display()
            ));
        }

        for p in cfg.problems() {
            clean = false;
            error(p);
        }

        if clean {
            success("Configuration is valid.");
        }
        Ok(clean)
    }

    pub fn migrate(path: &Path) -> AppResult<Vec<String>> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        add_missing_keys(path)
    }

    /// `KEY=VALUE` → update one key in the file.
    pub fn set(path: &Path, assignment: &str) -> AppResult<Config> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| AppError::InvalidValue {
            field: "--set".into(),
            value: format!("'{assignment}' (expected KEY=VALUE)"),
        })?;

        let cfg = set_key(path, key.trim(), value.trim())?;
        success(format!("{} = {}", key.trim(), value.trim()));
        Ok(cfg)
    }

    /// Open the config file in `editor`, falling back to $EDITOR / platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let fallback = default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| fallback.clone());

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{requested}'"
                ));
                return Ok(());
            }
            _ => warning(format!(
                "Editor '{requested}' not available, falling back to '{fallback}'"
            )),
        }

        match Command::new(&fallback).arg(path).status() {
            Ok(s) if s.success() => {
                info(format!("Configuration file edited using fallback '{fallback}'"));
                Ok(())
            }
            _ => Err(AppError::Config(format!(
                "failed to edit configuration file using '{fallback}'"
            ))),
        }
    }
}
