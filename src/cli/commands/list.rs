use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::calculate_summary;
use crate::core::select::{overtime_weeks_in_window, select_entries};
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::{Language, WorkEntry};
use crate::ui::messages::{header, info};
use crate::utils::colors::{YELLOW, colorize, colorize_optional};
use crate::utils::date::{today, weekday_short};
use crate::utils::formatting::{hours2, money, truncate};
use crate::utils::range::describe_range;
use crate::utils::table::{Column, Table};
use chrono::Datelike;
use std::collections::HashSet;

const COMMENT_WIDTH: usize = 40;
const WRAP_WIDTH: usize = 72;

/// Handle the `list` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        selection,
        lang,
        details,
    } = cmd
    {
        let sel = selection.to_selection(cfg)?;
        let pool = open_db(&cfg.database)?;
        let today = today();
        let entries = select_entries(&pool, cfg, &sel, today)?;

        header(describe_range(sel.range.as_deref()));

        let scope = match (&sel.range, sel.preset) {
            (Some(r), _) => r.clone(),
            (None, Some(p)) => p.as_str().to_string(),
            (None, None) if sel.filter.has_date_bounds() => "custom".to_string(),
            (None, None) => cfg.default_filter.as_str().to_string(),
        };
        info(format!(
            "period: {} | sort: {} {}",
            scope,
            sel.sort.field.as_str(),
            sel.sort.order.as_str()
        ));

        if entries.is_empty() {
            info("No work entries found.");
            return Ok(());
        }

        let lang = lang.unwrap_or(cfg.language);
        // highlight follows the complete week, also days outside the period
        let ot_weeks = overtime_weeks_in_window(&pool, cfg, &sel, today)?;

        println!("{}", render_table(&entries, lang, &ot_weeks, cfg));

        if *details {
            print_details(&entries);
        }

        let s = calculate_summary(&entries, &cfg.rates());
        println!(
            "{} entries | {} h total | {} h overtime in period | {}",
            s.entries,
            hours2(s.total_hours),
            hours2(s.overtime_hours),
            money(s.total_earnings, &cfg.currency)
        );
    }

    Ok(())
}

fn render_table(
    entries: &[WorkEntry],
    lang: Language,
    ot_weeks: &HashSet<(i32, u32)>,
    cfg: &Config,
) -> String {
    let mut table = Table::new(
        vec![
            Column::right("ID"),
            Column::left("DATE"),
            Column::left("DAY"),
            Column::right("WK"),
            Column::left("START"),
            Column::left("END"),
            Column::right("HOURS"),
            Column::right("COST"),
            Column::left("PHOTO"),
            Column::left("COMMENT"),
        ],
        cfg.separator(),
    );

    for e in entries {
        let week = e.date.iso_week();
        let hours = hours2(e.duration_hours());
        // entries of weeks over the weekly threshold are highlighted
        let hours = if ot_weeks.contains(&(week.year(), week.week())) {
            colorize(&hours, YELLOW)
        } else {
            hours
        };

        let cost = if e.materials_cost > 0.0 {
            format!("{:.2}", e.materials_cost)
        } else {
            String::new()
        };

        table.add_row(vec![
            e.id.to_string(),
            e.date_str(),
            weekday_short(e.date).to_string(),
            week.week().to_string(),
            e.start_str(),
            e.end_str(),
            hours,
            colorize_optional(&cost),
            if e.has_photo() { "📷".into() } else { colorize_optional("") },
            colorize_optional(&truncate(e.comment_for(lang), COMMENT_WIDTH)),
        ]);
    }

    table.render()
}

fn print_details(entries: &[WorkEntry]) {
    for e in entries {
        println!(
            "\n#{} {} {}-{}",
            e.id,
            e.date_str(),
            e.start_str(),
            e.end_str()
        );

        for (label, text) in [("EN", &e.comment_en), ("NL", &e.comment_nl)] {
            if text.trim().is_empty() {
                continue;
            }
            let opts = textwrap::Options::new(WRAP_WIDTH)
                .initial_indent("")
                .subsequent_indent("        ");
            println!("  {label}:   {}", textwrap::fill(text, opts));
        }

        if let Some(p) = e.photo.as_deref().filter(|p| !p.trim().is_empty()) {
            println!("  Photo: {p}");
        }
        println!("  Created {} | updated {}", e.created_at, e.updated_at);
    }
    println!();
}
