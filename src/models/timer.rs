use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;

/// The running timer (at most one, stored in `active_timer`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveTimer {
    pub started_at: DateTime<Local>,
    pub comment_en: String,
    pub comment_nl: String,
}

impl ActiveTimer {
    pub fn started_naive(&self) -> NaiveDateTime {
        self.started_at.naive_local()
    }

    pub fn elapsed_minutes(&self, now: DateTime<Local>) -> i64 {
        (now - self.started_at).num_minutes().max(0)
    }
}
