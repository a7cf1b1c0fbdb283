/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Overtime color:
/// \>0 → yellow
/// 0 → reset
pub fn color_for_overtime(hours: f64) -> &'static str {
    if hours > 0.0 { YELLOW } else { RESET }
}

/// Grey out empty cells ("" or "--") so that filled values stand out.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}

pub fn colorize(value: &str, color: &str) -> String {
    format!("{color}{value}{RESET}")
}
