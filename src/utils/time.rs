//! Time utilities: parsing HH:MM[:SS] and full punch timestamps.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(t: &str) -> AppResult<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .map_err(|_| AppError::InvalidTime(t.to_string()))
}

/// Same instant day and offset as `ts`, with the wall-clock time replaced.
pub fn with_time(ts: &DateTime<FixedOffset>, time: NaiveTime) -> AppResult<DateTime<FixedOffset>> {
    let naive = ts.date_naive().and_time(time);
    ts.offset()
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| AppError::InvalidTime(time.to_string()))
}

/// Local wall-clock time on `date`, with the offset in effect at that moment.
pub fn local_at(date: NaiveDate, time: NaiveTime) -> AppResult<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| AppError::InvalidTime(format!("{} {}", date, time)))
}

/// Parse a timestamp given on the command line.
///
/// Accepts RFC3339 (`2025-03-10T08:00:00-03:00`) or a local
/// `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts);
    }

    const LAYOUTS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    for layout in LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return local_at(naive.date(), naive.time());
        }
    }

    Err(AppError::InvalidTime(s.to_string()))
}
