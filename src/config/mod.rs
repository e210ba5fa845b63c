use crate::core::calculator::expected::parse_work_duration_to_minutes;
use crate::core::ledger::DayLedger;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod migrate;

/// Overrides the configuration directory (tests, portable installs).
pub const HOME_ENV: &str = "RPONTO_HOME";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_expected_work_duration")]
    pub expected_work_duration: String,
    #[serde(default = "default_recent_days")]
    pub recent_days: usize,
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default = "default_schedule")]
    pub schedule: String,
    #[serde(default = "default_true")]
    pub allow_location: bool,
    #[serde(default = "default_photo_dir")]
    pub photo_dir: String,
    #[serde(default = "default_attachment_dir")]
    pub attachment_dir: String,
    #[serde(default = "default_legacy_points_limit")]
    pub legacy_points_limit: usize,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_expected_work_duration() -> String {
    "9h".to_string()
}
fn default_recent_days() -> usize {
    5
}
fn default_user_name() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "user".to_string())
}
fn default_schedule() -> String {
    "Mon-Fri 08:00-17:00".to_string()
}
fn default_true() -> bool {
    true
}
fn default_photo_dir() -> String {
    Config::config_dir()
        .join("photos")
        .to_string_lossy()
        .to_string()
}
fn default_attachment_dir() -> String {
    Config::config_dir()
        .join("attachments")
        .to_string_lossy()
        .to_string()
}
fn default_legacy_points_limit() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            expected_work_duration: default_expected_work_duration(),
            recent_days: default_recent_days(),
            user_name: default_user_name(),
            job_title: String::new(),
            schedule: default_schedule(),
            allow_location: default_true(),
            photo_dir: default_photo_dir(),
            attachment_dir: default_attachment_dir(),
            legacy_points_limit: default_legacy_points_limit(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var(HOME_ENV)
            && !custom.trim().is_empty()
        {
            return expand_tilde(&custom);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rponto")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rponto")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rponto.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rponto.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Ledger using the configured workday length.
    pub fn ledger(&self) -> AppResult<DayLedger> {
        let minutes = parse_work_duration_to_minutes(&self.expected_work_duration)?;
        Ok(DayLedger::new(minutes))
    }

    pub fn photo_dir(&self) -> PathBuf {
        expand_tilde(&self.photo_dir)
    }

    pub fn attachment_dir(&self) -> PathBuf {
        expand_tilde(&self.attachment_dir)
    }

    /// Initialize configuration and database files.
    ///
    /// Returns the database path that was configured.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\nrecent_days: 7\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.recent_days, 7);
        assert_eq!(cfg.expected_work_duration, "9h");
        assert!(cfg.allow_location);
        assert_eq!(cfg.legacy_points_limit, 5);
    }

    #[test]
    fn ledger_uses_configured_workday() {
        let cfg = Config {
            expected_work_duration: "8h".into(),
            ..Config::default()
        };
        assert_eq!(cfg.ledger().unwrap().expected_minutes(), 480);

        let bad = Config {
            expected_work_duration: "lots".into(),
            ..Config::default()
        };
        assert!(matches!(bad.ledger(), Err(AppError::InvalidDuration(_))));
    }
}
