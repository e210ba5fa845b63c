use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    match Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

/// ANSI colour per audited operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "punch" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "adjust" => Colour::Cyan,
        "migration_applied" | "migrate_legacy" => Colour::Purple,
        "point" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// "operation (target)", truncated to `MAX_OP_WIDTH` visible characters with
/// only the operation word coloured.
fn render_op_target(row: &LogRow) -> String {
    let plain = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };

    let visible = if plain.chars().count() > MAX_OP_WIDTH {
        let mut s: String = plain.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&row.operation);
    match visible.split_once(' ') {
        Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rendered: Vec<(String, &LogRow)> =
            entries.iter().map(|r| (render_op_target(r), r)).collect();

        let op_w = rendered
            .iter()
            .map(|(s, _)| strip_ansi(s).chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|r| r.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (op_target, row) in rendered {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op_target).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id,
                row.date,
                op_target,
                padding,
                row.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(op: &str, target: &str) -> LogRow {
        LogRow {
            id: 1,
            date: "2025-03-10T08:00:00-03:00".into(),
            operation: op.into(),
            target: target.into(),
            message: String::new(),
        }
    }

    #[test]
    fn long_targets_are_truncated_without_counting_ansi() {
        let long = "x".repeat(100);
        let out = render_op_target(&row("punch", &long));
        let visible = strip_ansi(&out);
        assert_eq!(visible.chars().count(), MAX_OP_WIDTH);
        assert!(visible.ends_with("..."));
    }

    #[test]
    fn short_rows_are_kept() {
        let out = strip_ansi(&render_op_target(&row("edit", "2025-03-10")));
        assert_eq!(out, "edit (2025-03-10)");
    }
}
