//! Live timer: at most one running interval, turned into a work entry on stop.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_active_timer, insert_active_timer, insert_entry, load_active_timer};
use crate::errors::{AppError, AppResult};
use crate::models::{ActiveTimer, WorkEntry};
use crate::ui::messages::warning;
use chrono::{DateTime, Local, NaiveTime, Timelike};

/// Result of stopping the timer.
#[derive(Debug, Clone)]
pub struct StoppedTimer {
    pub entry: WorkEntry,
    /// The timer ran past midnight and the entry was closed at 23:59.
    pub clamped: bool,
}

pub struct TimerLogic;

fn truncate_to_minute(t: NaiveTime) -> NaiveTime {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

impl TimerLogic {
    pub fn start(
        pool: &mut DbPool,
        now: DateTime<Local>,
        comment_en: &str,
        comment_nl: &str,
    ) -> AppResult<ActiveTimer> {
        pool.with_transaction(|tx| {
            if let Some(running) = load_active_timer(tx)? {
                return Err(AppError::TimerAlreadyRunning(
                    running.started_at.format("%Y-%m-%d %H:%M").to_string(),
                ));
            }

            let timer = ActiveTimer {
                started_at: now,
                comment_en: comment_en.to_string(),
                comment_nl: comment_nl.to_string(),
            };
            insert_active_timer(tx, &timer)?;
            ttlog(
                tx,
                "timer",
                "start",
                &format!("Timer started at {}", now.format("%Y-%m-%d %H:%M")),
            )?;
            Ok(timer)
        })
    }

    pub fn status(pool: &DbPool) -> AppResult<Option<ActiveTimer>> {
        load_active_timer(&pool.conn)
    }

    /// Close the running timer at `now` and store the resulting entry.
    pub fn stop(pool: &mut DbPool, now: DateTime<Local>) -> AppResult<StoppedTimer> {
        let stopped = pool.with_transaction(|tx| {
            let timer = load_active_timer(tx)?.ok_or(AppError::NoActiveTimer)?;

            let started = timer.started_naive();
            let ended = now.naive_local();
            let date = started.date();
            let start = truncate_to_minute(started.time());

            let (end, clamped) = if ended.date() > date {
                (NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(start), true)
            } else {
                (truncate_to_minute(ended.time()).max(start), false)
            };

            let mut entry = WorkEntry::new(date, start, end)
                .with_comments(timer.comment_en.clone(), timer.comment_nl.clone());
            entry.validate()?;

            entry.id = insert_entry(tx, &entry)?;
            delete_active_timer(tx)?;
            ttlog(
                tx,
                "timer",
                &format!("#{}", entry.id),
                &format!(
                    "Timer stopped: {} {}-{}",
                    entry.date_str(),
                    entry.start_str(),
                    entry.end_str()
                ),
            )?;

            Ok::<_, AppError>(StoppedTimer { entry, clamped })
        })?;

        if stopped.clamped {
            warning(format!(
                "Timer crossed midnight: entry closed at 23:59 on {}.",
                stopped.entry.date_str()
            ));
        }

        Ok(stopped)
    }

    pub fn cancel(pool: &mut DbPool) -> AppResult<()> {
        pool.with_transaction(|tx| {
            if !delete_active_timer(tx)? {
                return Err(AppError::NoActiveTimer);
            }
            ttlog(tx, "timer", "cancel", "Running timer discarded")?;
            Ok(())
        })
    }
}
