use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::{calculate_summary, weekly_minutes};
use crate::core::select::{select_entries, whole_week_totals};
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, RESET, YELLOW, color_for_overtime, colorize};
use crate::utils::date::today;
use crate::utils::formatting::{hours2, money};
use crate::utils::mins2readable;
use crate::utils::range::describe_range;
use crate::utils::table::{Column, Table};
use std::collections::HashMap;

/// Handle the `summary` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { selection } = cmd {
        let sel = selection.to_selection(cfg)?;
        let pool = open_db(&cfg.database)?;
        let today = today();
        let entries = select_entries(&pool, cfg, &sel, today)?;

        header(describe_range(sel.range.as_deref()));

        if entries.is_empty() {
            info("No work entries found.");
            return Ok(());
        }

        let rates = cfg.rates();
        let s = calculate_summary(&entries, &rates);

        // per-week breakdown; FULL WEEK also counts days outside the period
        let full: HashMap<(i32, u32), i64> = whole_week_totals(&pool, cfg, &sel, today)?
            .into_iter()
            .map(|w| ((w.iso_year, w.week), w.minutes))
            .collect();

        let mut table = Table::new(
            vec![
                Column::left("WEEK"),
                Column::right("WORKED"),
                Column::right("OVERTIME"),
                Column::right("FULL WEEK"),
            ],
            cfg.separator(),
        );
        for w in weekly_minutes(&entries) {
            let over = (w.minutes as f64 / 60.0 - rates.weekly_hours).max(0.0);
            let week_minutes = full.get(&(w.iso_year, w.week)).copied().unwrap_or(w.minutes);
            let week_over = week_minutes as f64 / 60.0 > rates.weekly_hours;
            table.add_row(vec![
                format!("{}-W{:02}", w.iso_year, w.week),
                mins2readable(w.minutes),
                colorize(&hours2(over), color_for_overtime(over)),
                colorize(
                    &mins2readable(week_minutes),
                    if week_over { YELLOW } else { RESET },
                ),
            ]);
        }
        println!("{}", table.render());

        let line = |label: &str, value: String| println!("{CYAN}{label:<18}{RESET} {value}");

        line("Entries", s.entries.to_string());
        line("Total hours", hours2(s.total_hours));
        line("Regular hours", hours2(s.regular_hours));
        line(
            "Overtime hours",
            colorize(&hours2(s.overtime_hours), color_for_overtime(s.overtime_hours)),
        );
        line(
            "Weighted overtime",
            format!("{} (x{})", hours2(s.weighted_overtime_hours), rates.overtime_multiplier),
        );
        line("Materials", money(s.materials_cost, &cfg.currency));
        line("Total earnings", money(s.total_earnings, &cfg.currency));
    }

    Ok(())
}
