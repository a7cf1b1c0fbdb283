//! Formatting utilities used for CLI and export outputs.

/// `510` → `08h 30m`
pub fn mins2readable(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let abs_m = mins.abs();
    format!("{}{:02}h {:02}m", sign, abs_m / 60, abs_m % 60)
}

/// Hours with two decimals, as used in reports (`8.50`).
pub fn hours2(hours: f64) -> String {
    format!("{:.2}", hours)
}

pub fn money(amount: f64, currency: &str) -> String {
    if currency.is_empty() {
        format!("{:.2}", amount)
    } else {
        format!("{} {:.2}", currency, amount)
    }
}

/// Cut `s` to at most `max` characters, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_minutes() {
        assert_eq!(mins2readable(510), "08h 30m");
        assert_eq!(mins2readable(-75), "-01h 15m");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("ëëëëëëëëëë", 6), "ëëë...");
        assert_eq!(truncate("short", 10), "short");
    }
}
