use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Flat point record written by the first iteration of the app under the
/// `points` key. It carries no direction and a locale-formatted timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPoint {
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub registration_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
}

/// Locale layouts found in stored points (pt-BR first, then en-US).
const LOCALE_LAYOUTS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y, %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

impl LegacyPoint {
    /// Best-effort timestamp parsing. RFC 3339 keeps its own offset, locale
    /// strings are interpreted in the machine's local timezone.
    pub fn parsed_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.timestamp.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt);
        }

        LOCALE_LAYOUTS.iter().find_map(|layout| {
            let naive = NaiveDateTime::parse_from_str(raw, layout).ok()?;
            Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset())
        })
    }
}
