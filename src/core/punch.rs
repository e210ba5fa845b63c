use crate::core::audit_quietly;
use crate::core::ledger::DayLedger;
use crate::db::queries::{load_days, save_days};
use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::day_record::DayRecord;
use crate::models::event_kind::EventKind;
use crate::platform::{Camera, Geolocator, ReverseGeocoder, files};
use crate::ui::messages::warning;
use chrono::{DateTime, FixedOffset, Local};
use std::path::Path;

/// Device collaborators needed for a punch.
pub struct PunchDevices<'a> {
    pub geolocator: &'a dyn Geolocator,
    pub geocoder: &'a dyn ReverseGeocoder,
    pub camera: &'a dyn Camera,
}

/// What the confirmation screen shows after a successful punch.
#[derive(Debug, Clone)]
pub struct PunchReceipt {
    pub event: ClockEvent,
    pub registration_code: String,
    pub day: DayRecord,
}

pub struct PunchLogic;

impl PunchLogic {
    /// Record a punch.
    ///
    /// - position is mandatory (permission / fix errors abort)
    /// - address is best effort, empty on geocoding failure
    /// - photo, when taken, is moved into `photo_dir`
    /// - `at` overrides "now" (manual backfill)
    pub fn apply<S>(
        store: &mut S,
        ledger: &DayLedger,
        devices: &PunchDevices<'_>,
        kind: EventKind,
        at: Option<DateTime<FixedOffset>>,
        photo_dir: &Path,
    ) -> AppResult<PunchReceipt>
    where
        S: KeyValueStore + ?Sized,
    {
        // 1️⃣ position
        let coords = devices.geolocator.current_position()?;

        // 2️⃣ address (non fatal)
        let address = match devices.geocoder.reverse(coords) {
            Ok(a) => a.format_line(),
            Err(e) => {
                warning(format!("{}; punch saved without address.", e));
                String::new()
            }
        };

        // 3️⃣ event
        let timestamp = at.unwrap_or_else(|| Local::now().fixed_offset());
        let mut event = ClockEvent::new(kind, timestamp, coords, address);

        // 4️⃣ current list, read before anything is moved
        let days = load_days(store, ledger)?;

        // 5️⃣ photo
        let mut photo = None;
        if let Some(src) = devices.camera.capture()? {
            let stored = files::store_photo(&src, photo_dir, &timestamp, kind)?;
            event = event.with_photo(stored.to_string_lossy());
            photo = Some((src, stored));
        }

        // 6️⃣ write the whole list back
        let days = ledger.record_event(&days, event.clone());
        if let Err(e) = save_days(store, &days) {
            if let Some((src, stored)) = &photo
                && let Err(restore) = files::restore_photo(stored, src)
            {
                warning(format!(
                    "photo left at {}: {}",
                    stored.display(),
                    restore
                ));
            }
            return Err(e);
        }

        let day = days
            .into_iter()
            .find(|d| d.date() == event.local_date())
            .ok_or_else(|| AppError::NotFound(format!("day {}", event.local_date())))?;

        audit_quietly(
            store,
            "punch",
            &event.local_date().to_string(),
            &format!("{} at {} ({})", kind.label(), event.time_str(), event.id),
        );

        Ok(PunchReceipt {
            registration_code: event.id.receipt_code(),
            event,
            day,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;
    use crate::models::location::{Address, Coordinates};
    use std::path::PathBuf;

    struct Here(Option<Coordinates>);
    impl Geolocator for Here {
        fn current_position(&self) -> AppResult<Coordinates> {
            self.0
                .ok_or_else(|| AppError::PermissionDenied("denied".into()))
        }
    }

    struct Geo(Option<&'static str>);
    impl ReverseGeocoder for Geo {
        fn reverse(&self, _c: Coordinates) -> AppResult<Address> {
            match self.0 {
                Some(city) => Ok(Address {
                    street: Some("Rua Augusta".into()),
                    city: Some(city.into()),
                    region: Some("SP".into()),
                }),
                None => Err(AppError::GeocodeFailed("offline".into())),
            }
        }
    }

    struct NoCamera;
    impl Camera for NoCamera {
        fn capture(&self) -> AppResult<Option<PathBuf>> {
            Ok(None)
        }
    }

    fn at(s: &str) -> Option<DateTime<FixedOffset>> {
        Some(DateTime::parse_from_rfc3339(s).unwrap())
    }

    #[test]
    fn punches_accumulate_into_one_day() {
        let mut store = MemoryStore::new();
        let ledger = DayLedger::default();
        let here = Here(Some(Coordinates::new(-23.55, -46.65)));
        let geo = Geo(Some("São Paulo"));
        let devices = PunchDevices {
            geolocator: &here,
            geocoder: &geo,
            camera: &NoCamera,
        };
        let dir = Path::new("/nonexistent");

        PunchLogic::apply(&mut store, &ledger, &devices, EventKind::In, at("2025-03-10T08:00:00-03:00"), dir).unwrap();
        let receipt = PunchLogic::apply(&mut store, &ledger, &devices, EventKind::Out, at("2025-03-10T18:00:00-03:00"), dir).unwrap();

        assert_eq!(receipt.day.len(), 2);
        assert_eq!(receipt.day.bank_balance(), 60);
        assert_eq!(receipt.event.address, "Rua Augusta, São Paulo - SP");
        assert_eq!(receipt.registration_code.len(), 6);
        assert_eq!(store.audit_trail.len(), 2);

        let days = load_days(&store, &ledger).unwrap();
        assert_eq!(days.len(), 1);
    }

    #[test]
    fn geocode_failure_keeps_empty_address() {
        let mut store = MemoryStore::new();
        let here = Here(Some(Coordinates::new(0.0, 0.0)));
        let geo = Geo(None);
        let devices = PunchDevices {
            geolocator: &here,
            geocoder: &geo,
            camera: &NoCamera,
        };

        let r = PunchLogic::apply(&mut store, &DayLedger::default(), &devices, EventKind::In, None, Path::new(".")).unwrap();
        assert_eq!(r.event.address, "");
    }

    struct ReadOnly(MemoryStore);
    impl KeyValueStore for ReadOnly {
        fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.0.get(key)
        }
        fn set(&mut self, key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::StorageReadWriteFailed(format!("{key} is read-only")))
        }
        fn remove(&mut self, key: &str) -> AppResult<()> {
            self.0.remove(key)
        }
        fn keys(&self) -> AppResult<Vec<String>> {
            self.0.keys()
        }
    }

    struct ShotCamera(PathBuf);
    impl Camera for ShotCamera {
        fn capture(&self) -> AppResult<Option<PathBuf>> {
            Ok(Some(self.0.clone()))
        }
    }

    #[test]
    fn failed_save_gives_the_photo_back() {
        let tmp = tempfile::tempdir().unwrap();
        let shot = tmp.path().join("shot.jpg");
        std::fs::write(&shot, b"jpg").unwrap();
        let vault = tmp.path().join("photos");

        let here = Here(Some(Coordinates::new(-23.55, -46.65)));
        let geo = Geo(Some("São Paulo"));
        let camera = ShotCamera(shot.clone());
        let devices = PunchDevices {
            geolocator: &here,
            geocoder: &geo,
            camera: &camera,
        };
        let mut store = ReadOnly(MemoryStore::new());

        let err = PunchLogic::apply(&mut store, &DayLedger::default(), &devices, EventKind::In, at("2025-03-10T08:00:00-03:00"), &vault)
            .unwrap_err();

        assert!(matches!(err, AppError::StorageReadWriteFailed(_)));
        assert!(shot.is_file());
        assert_eq!(std::fs::read_dir(&vault).unwrap().count(), 0);
    }

    #[test]
    fn denied_location_aborts_without_writing() {
        let mut store = MemoryStore::new();
        let here = Here(None);
        let geo = Geo(None);
        let devices = PunchDevices {
            geolocator: &here,
            geocoder: &geo,
            camera: &NoCamera,
        };

        let err = PunchLogic::apply(&mut store, &DayLedger::default(), &devices, EventKind::In, None, Path::new(".")).unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
        assert!(store.keys().unwrap().is_empty());
    }
}
