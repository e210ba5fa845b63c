//! Formatting utilities used for CLI and export outputs.

/// Minute balance as shown on the home screen: `+1h05m`, `-0h30m`.
/// Zero is rendered with a plus sign.
pub fn format_bank_balance(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "+" };
    let abs_m = minutes.abs();
    format!("{}{}h{:02}m", sign, abs_m / 60, abs_m % 60)
}

pub fn mins2readable(mins: i64, want_sign: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 {
        "-"
    } else {
        ""
    };

    format!("{}{:02}h {:02}m", sign, hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_balance_format() {
        assert_eq!(format_bank_balance(0), "+0h00m");
        assert_eq!(format_bank_balance(65), "+1h05m");
        assert_eq!(format_bank_balance(-110), "-1h50m");
        assert_eq!(format_bank_balance(-5), "-0h05m");
        assert_eq!(format_bank_balance(600), "+10h00m");
    }

    #[test]
    fn readable_minutes() {
        assert_eq!(mins2readable(145, true), "+02h 25m");
        assert_eq!(mins2readable(145, false), "02h 25m");
        assert_eq!(mins2readable(-70, false), "-01h 10m");
        assert_eq!(mins2readable(0, true), "00h 00m");
    }
}
