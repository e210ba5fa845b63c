//! Moves captured photos and attached documents into app-private folders.

use crate::errors::AppResult;
use crate::models::event_kind::EventKind;
use crate::ui::messages::warning;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// ISO timestamp usable as a file name: `:` and `.` become `-`.
pub fn sanitize_timestamp(ts: &DateTime<FixedOffset>) -> String {
    let iso = ts.to_rfc3339_opts(SecondsFormat::Millis, true);
    match Regex::new(r"[:.]") {
        Ok(re) => re.replace_all(&iso, "-").into_owned(),
        Err(_) => iso.replace([':', '.'], "-"),
    }
}

/// `<sanitized-iso>_<ENTRADA|SAIDA>.<ext>`
pub fn photo_file_name(ts: &DateTime<FixedOffset>, kind: EventKind, source: &Path) -> String {
    let ext = source
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "jpg".to_string());
    format!("{}_{}.{}", sanitize_timestamp(ts), kind.label(), ext)
}

/// Try to move a file; fall back to copy + remove across filesystems.
fn move_or_copy(from: &Path, to: &Path) -> io::Result<()> {
    if fs::rename(from, to).is_err() {
        copy_then_remove(from, to)?;
    }
    Ok(())
}

/// A source that cannot be removed after the copy is left in place.
fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to)?;
    if let Err(e) = fs::remove_file(from) {
        warning(format!(
            "copied {} but could not remove the original: {}",
            from.display(),
            e
        ));
    }
    Ok(())
}

/// Move a captured photo into `dir`, returning its new location.
pub fn store_photo(
    source: &Path,
    dir: &Path,
    ts: &DateTime<FixedOffset>,
    kind: EventKind,
) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let target = dir.join(photo_file_name(ts, kind, source));
    move_or_copy(source, &target)?;
    Ok(target)
}

/// Put a stored photo back where it was captured.
pub fn restore_photo(stored: &Path, original: &Path) -> AppResult<()> {
    move_or_copy(stored, original)?;
    Ok(())
}

/// Copy an attached document into `dir`. The original stays where it is.
pub fn store_attachment(
    source: &Path,
    dir: &Path,
    name: &str,
    ts: &DateTime<FixedOffset>,
) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let target = dir.join(format!("{}_{}", sanitize_timestamp(ts), name));
    fs::copy(source, &target)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-03-10T08:01:02.345-03:00").unwrap()
    }

    #[test]
    fn sanitized_name_has_no_colons_or_dots() {
        let s = sanitize_timestamp(&ts());
        assert_eq!(s, "2025-03-10T08-01-02-345-03-00");
    }

    #[test]
    fn photo_name_carries_kind_and_extension() {
        let name = photo_file_name(&ts(), EventKind::In, Path::new("/tmp/IMG_001.JPG"));
        assert_eq!(name, "2025-03-10T08-01-02-345-03-00_ENTRADA.jpg");
    }

    #[test]
    fn photo_is_moved_into_vault() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("capture.png");
        fs::write(&src, b"png").unwrap();
        let vault = tmp.path().join("photos");

        let stored = store_photo(&src, &vault, &ts(), EventKind::Out).unwrap();

        assert!(stored.is_file());
        assert!(!src.exists());
        assert!(stored.to_string_lossy().ends_with("_SAIDA.png"));
    }

    #[test]
    fn copy_fallback_removes_the_source() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("capture.jpg");
        let dst = tmp.path().join("vault.jpg");
        fs::write(&src, b"jpg").unwrap();

        copy_then_remove(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"jpg");
    }

    #[test]
    fn copy_fallback_fails_when_the_source_is_gone() {
        let tmp = tempfile::tempdir().unwrap();
        let err = copy_then_remove(&tmp.path().join("missing.jpg"), &tmp.path().join("x.jpg"));
        assert!(err.is_err());
    }

    #[test]
    fn restored_photo_returns_to_its_origin() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("capture.png");
        fs::write(&src, b"png").unwrap();

        let stored = store_photo(&src, &tmp.path().join("photos"), &ts(), EventKind::In).unwrap();
        restore_photo(&stored, &src).unwrap();

        assert!(src.is_file());
        assert!(!stored.exists());
    }

    #[test]
    fn attachment_is_copied() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("atestado.pdf");
        fs::write(&src, b"%PDF").unwrap();

        let stored = store_attachment(&src, &tmp.path().join("docs"), "atestado.pdf", &ts()).unwrap();

        assert!(src.exists());
        assert!(stored.is_file());
    }
}
