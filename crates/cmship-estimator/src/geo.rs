//! Great-circle distance.

use cmship_core::Coordinates;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres (haversine formula).
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOUALA: Coordinates = Coordinates::new(4.0511, 9.7679);
    const BUEA: Coordinates = Coordinates::new(4.1527, 9.241);
    const YAOUNDE: Coordinates = Coordinates::new(3.848, 11.5021);

    #[test]
    fn distance_to_self_is_zero() {
        assert!(haversine_km(DOUALA, DOUALA).abs() < 1e-9);
        assert!(haversine_km(YAOUNDE, YAOUNDE).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [(DOUALA, BUEA), (BUEA, YAOUNDE), (DOUALA, YAOUNDE)];
        for (a, b) in pairs {
            assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
        }
    }

    #[test]
    fn douala_to_yaounde_is_about_190_km() {
        let km = haversine_km(DOUALA, YAOUNDE);
        assert!((185.0..200.0).contains(&km), "got {km}");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let km = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0));
        assert!((km - 111.19).abs() < 0.1, "got {km}");
    }

    #[test]
    fn antipodes_are_half_the_circumference() {
        let km = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0));
        assert!((km - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
