//! Collaborators backed by command-line arguments.

use super::{Camera, DocumentPicker, Geolocator, PickedDocument, ReverseGeocoder};
use crate::errors::{AppError, AppResult};
use crate::models::location::{Address, Coordinates};
use std::path::PathBuf;

/// Position given with `--lat/--lon`.
pub struct FixedPosition {
    pub coords: Option<Coordinates>,
    pub permission_granted: bool,
}

impl Geolocator for FixedPosition {
    fn current_position(&self) -> AppResult<Coordinates> {
        if !self.permission_granted {
            return Err(AppError::PermissionDenied(
                "location access is disabled (set allow_location: true)".into(),
            ));
        }

        let coords = self.coords.ok_or_else(|| {
            AppError::LocationUnavailable("no position given (use --lat and --lon)".into())
        })?;

        if !coords.is_valid() {
            return Err(AppError::LocationUnavailable(format!(
                "coordinates out of range: {}",
                coords.describe()
            )));
        }

        Ok(coords)
    }
}

/// Address typed by the user. There is no offline geocoder, so without
/// `--address` the lookup fails and the punch keeps an empty address.
pub struct ManualGeocoder {
    pub address: Option<String>,
}

impl ReverseGeocoder for ManualGeocoder {
    fn reverse(&self, coords: Coordinates) -> AppResult<Address> {
        match self.address.as_deref().map(str::trim) {
            Some(line) if !line.is_empty() => Ok(Address {
                street: Some(line.to_string()),
                city: None,
                region: None,
            }),
            _ => Err(AppError::GeocodeFailed(format!(
                "no address available for {}",
                coords.describe()
            ))),
        }
    }
}

/// Photo taken beforehand and passed with `--photo`.
pub struct FileCamera {
    pub path: Option<PathBuf>,
}

impl Camera for FileCamera {
    fn capture(&self) -> AppResult<Option<PathBuf>> {
        match &self.path {
            None => Ok(None),
            Some(p) if p.is_file() => Ok(Some(p.clone())),
            Some(p) => Err(AppError::ValidationFailed(format!(
                "photo not found: {}",
                p.display()
            ))),
        }
    }
}

/// Document chosen with `--file`. No path means the selection was cancelled.
pub struct PathPicker {
    pub path: Option<PathBuf>,
}

impl DocumentPicker for PathPicker {
    fn pick(&self) -> AppResult<Option<PickedDocument>> {
        let Some(p) = &self.path else {
            return Ok(None);
        };

        if !p.is_file() {
            return Err(AppError::ValidationFailed(format!(
                "file not found: {}",
                p.display()
            )));
        }

        let name = p
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| p.display().to_string());

        Ok(Some(PickedDocument {
            name,
            path: p.clone(),
        }))
    }
}
