use super::language::Language;
use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    #[serde(default)]
    pub id: i64, // ⇔ work_entries.id (0 until stored)
    pub date: NaiveDate, // ⇔ work_entries.date (TEXT "YYYY-MM-DD")
    #[serde(with = "hhmm")]
    pub start: NaiveTime, // ⇔ work_entries.start_time (TEXT "HH:MM")
    #[serde(with = "hhmm")]
    pub end: NaiveTime, // ⇔ work_entries.end_time (TEXT "HH:MM")
    #[serde(default)]
    pub comment_en: String,
    #[serde(default)]
    pub comment_nl: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub materials_cost: f64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl WorkEntry {
    /// Build an unsaved entry with empty comments and no costs.
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        let now = Local::now().to_rfc3339();
        Self {
            id: 0,
            date,
            start,
            end,
            comment_en: String::new(),
            comment_nl: String::new(),
            photo: None,
            materials_cost: 0.0,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn with_comments(mut self, en: impl Into<String>, nl: impl Into<String>) -> Self {
        self.comment_en = en.into();
        self.comment_nl = nl.into();
        self
    }

    pub fn with_photo(mut self, photo: Option<String>) -> Self {
        self.photo = photo;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.materials_cost = cost;
        self
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn start_str(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%H:%M").to_string()
    }

    /// Net minutes between start and end. Negative only for invalid entries.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }

    pub fn has_photo(&self) -> bool {
        self.photo
            .as_deref()
            .map(|p| !p.trim().is_empty())
            .unwrap_or(false)
    }

    /// Comment in the requested language, falling back to the other one when empty.
    pub fn comment_for(&self, lang: Language) -> &str {
        let (primary, secondary) = match lang {
            Language::En => (&self.comment_en, &self.comment_nl),
            Language::Nl => (&self.comment_nl, &self.comment_en),
        };

        if primary.trim().is_empty() {
            secondary
        } else {
            primary
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.end < self.start {
            return Err(AppError::InvalidInterval {
                start: self.start_str(),
                end: self.end_str(),
            });
        }

        if !self.materials_cost.is_finite() || self.materials_cost < 0.0 {
            return Err(AppError::InvalidCost(self.materials_cost));
        }

        Ok(())
    }
}

/// Partial update applied by `edit`. Unset fields keep their stored value.
#[derive(Debug, Default, Clone)]
pub struct EntryPatch {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub comment_en: Option<String>,
    pub comment_nl: Option<String>,
    pub photo: Option<String>,
    pub clear_photo: bool,
    pub materials_cost: Option<f64>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.comment_en.is_none()
            && self.comment_nl.is_none()
            && self.photo.is_none()
            && !self.clear_photo
            && self.materials_cost.is_none()
    }

    pub fn apply_to(&self, entry: &mut WorkEntry) {
        if let Some(d) = self.date {
            entry.date = d;
        }
        if let Some(t) = self.start {
            entry.start = t;
        }
        if let Some(t) = self.end {
            entry.end = t;
        }
        if let Some(c) = &self.comment_en {
            entry.comment_en = c.clone();
        }
        if let Some(c) = &self.comment_nl {
            entry.comment_nl = c.clone();
        }
        if self.clear_photo {
            entry.photo = None;
        } else if let Some(p) = &self.photo {
            entry.photo = Some(p.clone());
        }
        if let Some(c) = self.materials_cost {
            entry.materials_cost = c;
        }
    }
}

/// `HH:MM` on the wire; `HH:MM:SS` is accepted when reading older backups.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|_| serde::de::Error::custom(format!("invalid time '{raw}'")))
    }
}
