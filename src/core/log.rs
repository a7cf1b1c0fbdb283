use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::visible_width;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

/// ANSI colour for each audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "backup" | "restore" => Colour::Blue,
        "timer" => Colour::Cyan,
        "export" => Colour::RGB(102, 204, 255),
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

/// `op (target)`, cut to `MAX_OP_WIDTH` visible characters; only `op` is coloured.
fn op_cell(operation: &str, target: &str) -> String {
    let plain = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    let plain = if plain.chars().count() > MAX_OP_WIDTH {
        let mut s: String = plain.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(operation);
    match plain.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(plain.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool, limit: Option<usize>) -> AppResult<()> {
        let rows = load_log(&pool.conn, limit)?;

        if rows.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let lines: Vec<(i64, String, String, String)> = rows
            .into_iter()
            .map(|r| {
                let date = chrono::DateTime::parse_from_rfc3339(&r.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(r.date);
                (r.id, date, op_cell(&r.operation, &r.target), r.message)
            })
            .collect();

        let id_w = lines
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = lines.iter().map(|(_, d, ..)| d.len()).max().unwrap_or(10);
        let op_w = lines
            .iter()
            .map(|(_, _, op, _)| visible_width(op))
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, op, message) in lines {
            let padding = " ".repeat(op_w.saturating_sub(visible_width(&op)));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id, date, op, padding, message
            );
        }

        Ok(())
    }
}
