//! Hours, overtime and earnings over a list of work entries.

pub mod overtime;
pub mod summary;

pub use overtime::{calculate_overtime, overtime_hours, overtime_weeks, weekly_minutes};
pub use summary::calculate_summary;

/// Pay parameters taken from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub hourly_rate: f64,
    pub weekly_hours: f64,
    pub overtime_multiplier: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            hourly_rate: 15.0,
            weekly_hours: 40.0,
            overtime_multiplier: 1.5,
        }
    }
}
