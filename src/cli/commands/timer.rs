use crate::cli::parser::{Commands, TimerAction};
use crate::config::Config;
use crate::core::timer::TimerLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::mins2readable;
use chrono::Local;

/// Handle the `timer` subcommands
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timer { action } = cmd {
        let mut pool = open_db(&cfg.database)?;
        let now = Local::now();

        match action {
            TimerAction::Start {
                comment_en,
                comment_nl,
            } => {
                let t = TimerLogic::start(
                    &mut pool,
                    now,
                    comment_en.as_deref().unwrap_or(""),
                    comment_nl.as_deref().unwrap_or(""),
                )?;
                success(format!(
                    "⏱️ Timer started at {}",
                    t.started_at.format("%Y-%m-%d %H:%M")
                ));
            }
            TimerAction::Stop => {
                let stopped = TimerLogic::stop(&mut pool, now)?;
                let e = &stopped.entry;
                success(format!(
                    "Entry #{} added: {} {}-{} ({})",
                    e.id,
                    e.date_str(),
                    e.start_str(),
                    e.end_str(),
                    mins2readable(e.duration_minutes())
                ));
            }
            TimerAction::Status => match TimerLogic::status(&pool)? {
                Some(t) => info(format!(
                    "⏱️ Running since {} ({})",
                    t.started_at.format("%Y-%m-%d %H:%M"),
                    mins2readable(t.elapsed_minutes(now))
                )),
                None => info("No timer is running."),
            },
            TimerAction::Cancel => {
                TimerLogic::cancel(&mut pool)?;
                success("Timer cancelled.");
            }
        }
    }

    Ok(())
}
