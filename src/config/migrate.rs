use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Parse the YAML file as a raw mapping so unknown keys survive a rewrite.
fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: top-level value is not a mapping",
            path.display()
        ))),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Config("default config is not a mapping".into())),
    }
}

/// Keys present in the default configuration but missing from `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value and write the file back.
/// Existing values are never touched. Returns the keys that were added.
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;
    let mut added = Vec::new();

    for (key, value) in defaults {
        if !current.contains_key(&key) {
            if let Some(name) = key.as_str() {
                added.push(name.to_string());
            }
            current.insert(key, value);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&Value::Mapping(current))?;
        fs::write(path, serialized)?;
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_keys_are_added_with_defaults() {
        let dir = tempdir().unwrap();
        let conf = dir.path().join("rponto.conf");
        fs::write(&conf, "database: /tmp/a.sqlite\nrecent_days: 3\ncustom: kept\n").unwrap();

        let missing = missing_keys(&conf).unwrap();
        assert!(missing.contains(&"expected_work_duration".to_string()));
        assert!(!missing.contains(&"database".to_string()));

        let added = migrate_config_file(&conf).unwrap();
        assert_eq!(added, missing);
        assert!(missing_keys(&conf).unwrap().is_empty());

        let text = fs::read_to_string(&conf).unwrap();
        assert!(text.contains("recent_days: 3"));
        assert!(text.contains("custom: kept"));

        // second run changes nothing
        assert!(migrate_config_file(&conf).unwrap().is_empty());
    }

    #[test]
    fn non_mapping_is_rejected() {
        let dir = tempdir().unwrap();
        let conf = dir.path().join("rponto.conf");
        fs::write(&conf, "- a\n- b\n").unwrap();
        assert!(matches!(missing_keys(&conf), Err(AppError::Config(_))));
    }
}
