use crate::core::calculator::Rates;
use crate::errors::{AppError, AppResult};
use crate::models::{FilterPreset, Language, SortField, SortOptions, SortOrder};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "RWORKLOG_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    pub hourly_rate: f64,
    pub weekly_hours: f64,
    pub overtime_multiplier: f64,
    pub currency: String,
    pub language: Language,
    pub default_filter: FilterPreset,
    pub default_sort: SortField,
    pub default_order: SortOrder,
    pub separator_char: String,
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            hourly_rate: 15.0,
            weekly_hours: 40.0,
            overtime_multiplier: 1.5,
            currency: "€".to_string(),
            language: Language::En,
            default_filter: FilterPreset::All,
            default_sort: SortField::Date,
            default_order: SortOrder::Desc,
            separator_char: "-".to_string(),
        }
    }
}

impl Config {
    /// Return the configuration directory: `$RWORKLOG_CONFIG_DIR`, or the
    /// platform default (`%APPDATA%\rworklog`, `~/.rworklog`).
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var(CONFIG_DIR_ENV)
            && !custom.trim().is_empty()
        {
            return PathBuf::from(custom);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rworklog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rworklog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rworklog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rworklog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    pub fn rates(&self) -> Rates {
        Rates {
            hourly_rate: self.hourly_rate,
            weekly_hours: self.weekly_hours,
            overtime_multiplier: self.overtime_multiplier,
        }
    }

    pub fn sort_options(&self) -> SortOptions {
        SortOptions {
            field: self.default_sort,
            order: self.default_order,
        }
    }

    /// First character of `separator_char`, `-` when empty.
    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// List of human readable problems; empty when the values are usable.
    pub fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();

        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            out.push(format!(
                "hourly_rate must be >= 0 (found {})",
                self.hourly_rate
            ));
        }
        if !self.weekly_hours.is_finite() || self.weekly_hours <= 0.0 {
            out.push(format!(
                "weekly_hours must be > 0 (found {})",
                self.weekly_hours
            ));
        }
        if !self.overtime_multiplier.is_finite() || self.overtime_multiplier < 1.0 {
            out.push(format!(
                "overtime_multiplier must be >= 1 (found {})",
                self.overtime_multiplier
            ));
        }
        if self.database.trim().is_empty() {
            out.push("database path is empty".to_string());
        }

        out
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\nweekly_hours: 38\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.weekly_hours, 38.0);
        assert_eq!(cfg.hourly_rate, 15.0);
        assert_eq!(cfg.overtime_multiplier, 1.5);
        assert_eq!(cfg.language, Language::En);
    }

    #[test]
    fn enums_use_readable_names() {
        let cfg: Config = serde_yaml::from_str(
            "language: dutch\ndefault_filter: this-week\ndefault_sort: start-time\ndefault_order: asc\n",
        )
        .unwrap();
        assert_eq!(cfg.language, Language::Nl);
        assert_eq!(cfg.default_filter, FilterPreset::ThisWeek);
        assert_eq!(cfg.default_sort, SortField::StartTime);
        assert_eq!(cfg.default_order, SortOrder::Asc);
    }

    #[test]
    fn invalid_values_are_reported() {
        let cfg = Config {
            hourly_rate: -1.0,
            weekly_hours: 0.0,
            overtime_multiplier: 0.5,
            ..Config::default()
        };
        assert_eq!(cfg.problems().len(), 3);
        assert!(Config::default().problems().is_empty());
    }
}
