use serde::{Deserialize, Serialize};

/// A geolocation fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// "Latitude: -23.550520, Longitude: -46.633308"
    pub fn describe(&self) -> String {
        format!(
            "Latitude: {:.6}, Longitude: {:.6}",
            self.latitude, self.longitude
        )
    }
}

/// Best-effort reverse-geocoding result. Any part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

impl Address {
    /// Render as "{street}, {city} - {region}", dropping the missing parts.
    pub fn format_line(&self) -> String {
        let head: Vec<&str> = [self.street.as_deref(), self.city.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();

        let mut line = head.join(", ");
        if let Some(region) = self.region.as_deref().filter(|r| !r.trim().is_empty()) {
            if !line.is_empty() {
                line.push_str(" - ");
            }
            line.push_str(region);
        }
        line
    }
}
