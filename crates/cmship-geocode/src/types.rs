//! `OpenCage` forward-geocoding response types.
//!
//! Every response is wrapped in `{"status": {"code", "message"}, "results": [...]}`,
//! including error responses, which carry an empty `results` array.

use cmship_core::{AddressComponents, Coordinates, GeocodeResult};
use serde::Deserialize;

/// Top-level envelope for `OpenCage` responses.
#[derive(Debug, Deserialize)]
pub struct OpenCageResponse {
    #[serde(default)]
    pub status: Option<OpenCageStatus>,
    #[serde(default)]
    pub results: Vec<OpenCageResult>,
    #[serde(default)]
    pub total_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct OpenCageStatus {
    pub code: u16,
    pub message: String,
}

/// One candidate place.
#[derive(Debug, Deserialize)]
pub struct OpenCageResult {
    pub formatted: String,
    /// Absent for a handful of administrative-area results.
    #[serde(default)]
    pub geometry: Option<OpenCageGeometry>,
    #[serde(default)]
    pub components: OpenCageComponents,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OpenCageGeometry {
    pub lat: f64,
    pub lng: f64,
}

/// Address components. `OpenCage` returns many more keys than modelled here;
/// unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct OpenCageComponents {
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

impl From<OpenCageResult> for GeocodeResult {
    fn from(raw: OpenCageResult) -> Self {
        let c = raw.components;
        Self {
            formatted: raw.formatted,
            coordinates: raw.geometry.map(|g| Coordinates::new(g.lat, g.lng)),
            components: AddressComponents {
                city: c.city,
                town: c.town,
                state: c.state,
                village: c.village,
                suburb: c.suburb,
                road: c.road,
                country: c.country,
                country_code: c.country_code,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_full_result() {
        let raw: OpenCageResult = serde_json::from_value(serde_json::json!({
            "formatted": "Buea, Southwest, Cameroon",
            "geometry": { "lat": 4.1527, "lng": 9.241 },
            "components": {
                "_type": "city",
                "city": "Buea",
                "state": "Southwest",
                "country": "Cameroon",
                "country_code": "cm",
                "ISO_3166-1_alpha-2": "CM"
            },
            "confidence": 6
        }))
        .unwrap();

        let result = GeocodeResult::from(raw);
        assert_eq!(result.formatted, "Buea, Southwest, Cameroon");
        assert_eq!(result.coordinates, Some(Coordinates::new(4.1527, 9.241)));
        assert_eq!(result.components.city.as_deref(), Some("Buea"));
        assert_eq!(result.components.country_code.as_deref(), Some("cm"));
    }

    #[test]
    fn missing_geometry_becomes_none() {
        let raw: OpenCageResult = serde_json::from_value(serde_json::json!({
            "formatted": "Littoral, Cameroon",
            "components": { "state": "Littoral" }
        }))
        .unwrap();

        let result = GeocodeResult::from(raw);
        assert!(result.coordinates.is_none());
        assert_eq!(result.components.state.as_deref(), Some("Littoral"));
    }

    #[test]
    fn error_envelope_parses_with_empty_results() {
        let resp: OpenCageResponse = serde_json::from_value(serde_json::json!({
            "status": { "code": 401, "message": "invalid API key" },
            "results": [],
            "total_results": 0
        }))
        .unwrap();
        assert!(resp.results.is_empty());
        assert_eq!(resp.status.unwrap().code, 401);
    }
}
