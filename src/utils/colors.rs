/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

use crate::models::event_kind::EventKind;

/// Balance color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_surplus(value: i64) -> &'static str {
    if value > 0 {
        GREEN
    } else if value < 0 {
        RED
    } else {
        RESET
    }
}

/// Grey placeholder for empty cells (no address, no photo, ...).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}

/// IN in green, OUT in red.
pub fn colorize_kind(value: &str, kind: EventKind) -> String {
    match kind {
        EventKind::In => format!("{GREEN}{value}{RESET}"),
        EventKind::Out => format!("{RED}{value}{RESET}"),
    }
}

/// Irregular days are highlighted so they stand out in listings.
pub fn colorize_irregular(value: &str, irregular: bool) -> String {
    if irregular {
        format!("{YELLOW}{value}{RESET}")
    } else {
        value.to_string()
    }
}
