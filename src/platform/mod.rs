//! Device collaborators used while punching and filing adjustments.
//!
//! The CLI ships simple adapters (`cli`); a mobile shell would provide its
//! own implementations of the same traits.

pub mod cli;
pub mod files;

use crate::errors::AppResult;
use crate::models::location::{Address, Coordinates};
use std::path::PathBuf;

/// Current position of the device.
///
/// Fails with `PermissionDenied` or `LocationUnavailable`.
pub trait Geolocator {
    fn current_position(&self) -> AppResult<Coordinates>;
}

/// Best-effort address lookup. Failures are not fatal to a punch.
pub trait ReverseGeocoder {
    fn reverse(&self, coords: Coordinates) -> AppResult<Address>;
}

/// Still image capture. `None` means no photo was taken.
pub trait Camera {
    fn capture(&self) -> AppResult<Option<PathBuf>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedDocument {
    pub name: String,
    pub path: PathBuf,
}

/// Document selection. `None` means the user cancelled.
pub trait DocumentPicker {
    fn pick(&self) -> AppResult<Option<PickedDocument>>;
}
