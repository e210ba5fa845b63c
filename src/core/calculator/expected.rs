use crate::errors::{AppError, AppResult};
use regex::Regex;

/// Default expected workday: 9 hours.
pub const DEFAULT_EXPECTED_MINUTES: i64 = 9 * 60;

/// A workday never exceeds a calendar day.
pub const MAX_EXPECTED_MINUTES: i64 = 24 * 60;

/// Parse the configured workday length.
///
/// Accepted forms: `"9h"`, `"8h30m"`, `"7h 45m"`, `"45m"`, `"480"` (minutes),
/// up to 24h.
pub fn parse_work_duration_to_minutes(s: &str) -> AppResult<i64> {
    let trimmed = s.trim();
    let within_day = |mins: i64| -> AppResult<i64> {
        if (0..=MAX_EXPECTED_MINUTES).contains(&mins) {
            Ok(mins)
        } else {
            Err(AppError::InvalidDuration(s.to_string()))
        }
    };

    if let Ok(mins) = trimmed.parse::<i64>() {
        return within_day(mins);
    }

    let re = Regex::new(r"^(?:(\d+)\s*h)?\s*(?:(\d+)\s*m)?$")
        .map_err(|e| AppError::InvalidDuration(e.to_string()))?;

    let caps = re
        .captures(trimmed)
        .ok_or_else(|| AppError::InvalidDuration(s.to_string()))?;

    let hours = caps.get(1).map(|m| m.as_str());
    let minutes = caps.get(2).map(|m| m.as_str());

    if hours.is_none() && minutes.is_none() {
        return Err(AppError::InvalidDuration(s.to_string()));
    }

    let to_num = |part: Option<&str>| -> AppResult<i64> {
        part.map_or(Ok(0), |p| {
            p.parse::<i64>()
                .map_err(|_| AppError::InvalidDuration(s.to_string()))
        })
    };

    let (h, m) = (to_num(hours)?, to_num(minutes)?);
    let total = h
        .checked_mul(60)
        .and_then(|h| h.checked_add(m))
        .ok_or_else(|| AppError::InvalidDuration(s.to_string()))?;

    within_day(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_forms() {
        assert_eq!(parse_work_duration_to_minutes("9h").unwrap(), 540);
        assert_eq!(parse_work_duration_to_minutes("8h30m").unwrap(), 510);
        assert_eq!(parse_work_duration_to_minutes("7h 45m").unwrap(), 465);
        assert_eq!(parse_work_duration_to_minutes("45m").unwrap(), 45);
        assert_eq!(parse_work_duration_to_minutes(" 480 ").unwrap(), 480);
    }

    #[test]
    fn rejected_forms() {
        assert!(parse_work_duration_to_minutes("").is_err());
        assert!(parse_work_duration_to_minutes("nine hours").is_err());
        assert!(parse_work_duration_to_minutes("-30").is_err());
    }

    #[test]
    fn longer_than_a_day_is_rejected() {
        assert_eq!(parse_work_duration_to_minutes("24h").unwrap(), 1440);
        assert!(matches!(
            parse_work_duration_to_minutes("24h1m"),
            Err(AppError::InvalidDuration(_))
        ));
        assert!(parse_work_duration_to_minutes("1441").is_err());
        assert!(parse_work_duration_to_minutes("200000000000000000h").is_err());
        assert!(parse_work_duration_to_minutes("9223372036854775807").is_err());
        assert!(parse_work_duration_to_minutes("99999999999999999999999h").is_err());
    }
}
