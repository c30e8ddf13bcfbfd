//! Geographic value types shared by the geocoder, the estimator and checkout.

use serde::{Deserialize, Serialize};

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `true` when both components are finite and inside the valid
    /// latitude/longitude ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Administrative components attached to a geocoded place.
///
/// Every field is optional; providers only fill what they know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponents {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub road: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// One geocoding candidate as returned by a provider.
///
/// `coordinates` is optional because providers occasionally return a
/// candidate without geometry; such candidates cannot be quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted: String,
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub components: AddressComponents,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_validity() {
        assert!(Coordinates::new(4.0511, 9.7679).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn coordinates_display_uses_four_decimals() {
        assert_eq!(Coordinates::new(4.05112, 9.7679).to_string(), "4.0511, 9.7679");
    }

    #[test]
    fn geocode_result_deserializes_without_components() {
        let json = r#"{"formatted":"Buea, Cameroon","coordinates":{"lat":4.15,"lng":9.24}}"#;
        let result: GeocodeResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.components, AddressComponents::default());
        assert_eq!(result.coordinates, Some(Coordinates::new(4.15, 9.24)));
    }
}
