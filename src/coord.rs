//! Geographic points and circular regions
use crate::constants::Constants;

/// Geodetic point in decimal degrees on the spherical Earth model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoCoordinate {
    /// Latitude in decimal degrees, positive North
    pub latitude: f64,
    /// Longitude in decimal degrees, positive East
    pub longitude: f64,
}

impl Default for GeoCoordinate {
    /// Builds an invalid [GeoCoordinate]
    fn default() -> Self {
        Self {
            latitude: f64::NAN,
            longitude: f64::NAN,
        }
    }
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components exist and lie in range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }

    /// Great-circle distance to `rhs` in meters (haversine).
    pub fn distance_m(&self, rhs: &Self) -> f64 {
        let (lat1, lon1) = (self.latitude.to_radians(), self.longitude.to_radians());
        let (lat2, lon2) = (rhs.latitude.to_radians(), rhs.longitude.to_radians());
        let dlat = lat2 - lat1;
        let dlon = lon2 - lon1;
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * Constants::EARTH_RADIUS_M * a.sqrt().asin()
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({:.5}°, {:.5}°)", self.latitude, self.longitude)
    }
}

/// Circular region: a center point and a radius in meters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoCircle {
    pub center: GeoCoordinate,
    pub radius_m: f64,
}

impl Default for GeoCircle {
    /// Builds an invalid [GeoCircle]
    fn default() -> Self {
        Self {
            center: GeoCoordinate::default(),
            radius_m: -1.0,
        }
    }
}

impl GeoCircle {
    pub fn new(center: GeoCoordinate, radius_m: f64) -> Self {
        Self { center, radius_m }
    }

    /// Returns true if the center lies in range and the radius is non negative.
    pub fn is_valid(&self) -> bool {
        self.center.is_valid() && self.radius_m.is_finite() && self.radius_m >= 0.0
    }

    /// Returns true if `point` lies within this region.
    pub fn contains(&self, point: &GeoCoordinate) -> bool {
        self.center.distance_m(point) <= self.radius_m
    }
}

impl std::fmt::Display for GeoCircle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} r={:.0}m", self.center, self.radius_m)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn coordinate_validity() {
        assert!(GeoCoordinate::new(40.6399, -73.7786).is_valid());
        assert!(GeoCoordinate::new(-90.0, 180.0).is_valid());
        assert!(!GeoCoordinate::new(90.1, 0.0).is_valid());
        assert!(!GeoCoordinate::new(0.0, -180.5).is_valid());
        assert!(!GeoCoordinate::default().is_valid());
    }
    #[test]
    fn haversine_distance() {
        let jfk = GeoCoordinate::new(40.6399, -73.7786);
        let lga = GeoCoordinate::new(40.7772, -73.8726);
        assert_eq!(jfk.distance_m(&jfk), 0.0);
        // published JFK-LGA distance is about 17.3 km
        let d = jfk.distance_m(&lga);
        assert!((d - 17_300.0).abs() < 300.0, "got {}", d);
        assert_eq!(jfk.distance_m(&lga), lga.distance_m(&jfk));
    }
    #[test]
    fn circle_containment() {
        let circle = GeoCircle::new(GeoCoordinate::new(40.6399, -73.7786), 20_000.0);
        assert!(circle.is_valid());
        assert!(circle.contains(&circle.center));
        assert!(circle.contains(&GeoCoordinate::new(40.7772, -73.8726)));
        assert!(!circle.contains(&GeoCoordinate::new(41.0, -72.0)));
        assert!(!GeoCircle::default().is_valid());
    }
}
