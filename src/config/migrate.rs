//! YAML-level maintenance of the configuration file: detect keys missing
//! from older files, write their defaults, update single keys.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Default configuration as a YAML mapping (source of the known keys).
fn default_mapping() -> AppResult<Mapping> {
    let value = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(format!("serialize defaults: {e}")))?;

    match value {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("defaults are not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;

    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(_) => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
        Err(e) => Err(AppError::Config(format!(
            "cannot parse {}: {e}",
            path.display()
        ))),
    }
}

fn write_mapping(path: &Path, map: &Mapping) -> AppResult<()> {
    let serialized =
        serde_yaml::to_string(map).map_err(|e| AppError::Config(format!("serialize error: {e}")))?;
    fs::write(path, serialized).map_err(|_| AppError::ConfigSave)
}

/// Keys known to this version that are absent from the file.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Keys present in the file that this version does not know.
pub fn unknown_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(current
        .keys()
        .filter(|k| !defaults.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Write the default value of every missing key. Returns the added keys.
pub fn add_missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;
    let mut added = Vec::new();

    for (k, v) in defaults.iter() {
        if !current.contains_key(k) {
            current.insert(k.clone(), v.clone());
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
        }
    }

    if added.is_empty() {
        info("Configuration is up to date.");
        return Ok(added);
    }

    write_mapping(path, &current)?;
    success(format!("Configuration migrated, added: {}", added.join(", ")));

    Ok(added)
}

/// Set a single key. The resulting file must still deserialize into a
/// valid `Config`, otherwise nothing is written.
pub fn set_key(path: &Path, key: &str, raw_value: &str) -> AppResult<Config> {
    let defaults = default_mapping()?;
    let key_value = Value::String(key.to_string());

    if !defaults.contains_key(&key_value) {
        return Err(AppError::Config(format!("unknown configuration key '{key}'")));
    }

    let mut current = if path.exists() {
        read_mapping(path)?
    } else {
        defaults.clone()
    };

    // Plain YAML scalar parsing: "40" → number, "nl" → string.
    let parsed: Value =
        serde_yaml::from_str(raw_value).unwrap_or_else(|_| Value::String(raw_value.to_string()));
    let parsed = match parsed {
        Value::Null => Value::String(String::new()),
        other => other,
    };

    current.insert(key_value, parsed);

    let cfg: Config = serde_yaml::from_value(Value::Mapping(current.clone())).map_err(|e| {
        AppError::InvalidValue {
            field: key.to_string(),
            value: format!("{raw_value} ({e})"),
        }
    })?;

    let problems = cfg.problems();
    if !problems.is_empty() {
        return Err(AppError::Config(problems.join("; ")));
    }

    write_mapping(path, &current)?;
    Ok(cfg)
}
