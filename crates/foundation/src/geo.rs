use serde::{Deserialize, Serialize};

/// Valid latitude range (degrees).
pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
/// Valid longitude range (degrees).
pub const LNG_RANGE: (f64, f64) = (-180.0, 180.0);

/// A WGS84 position in degrees.
///
/// Serialized as `[lng, lat]`, the order map substrates expect for centers.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Builds a position from optional latitude/longitude fields.
    ///
    /// Returns `None` when either field is missing or the pair is not a valid
    /// WGS84 coordinate.
    pub fn from_lat_lng(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        let p = Self::new(lng?, lat?);
        p.is_valid().then_some(p)
    }

    /// Finite and inside the WGS84 latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (LAT_RANGE.0..=LAT_RANGE.1).contains(&self.lat)
            && (LNG_RANGE.0..=LNG_RANGE.1).contains(&self.lng)
    }

    pub fn as_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        p.as_array()
    }
}

#[cfg(test)]
mod tests {
    use super::LngLat;

    #[test]
    fn missing_or_out_of_range_fields_are_rejected() {
        assert!(LngLat::from_lat_lng(None, Some(30.0)).is_none());
        assert!(LngLat::from_lat_lng(Some(50.0), None).is_none());
        assert!(LngLat::from_lat_lng(Some(91.0), Some(30.0)).is_none());
        assert!(LngLat::from_lat_lng(Some(50.0), Some(-180.5)).is_none());
        assert!(LngLat::from_lat_lng(Some(f64::NAN), Some(30.0)).is_none());

        let p = LngLat::from_lat_lng(Some(50.4501), Some(30.5234)).unwrap();
        assert_eq!(p, LngLat::new(30.5234, 50.4501));
    }

    #[test]
    fn serializes_as_lng_lat_pair() {
        let json = serde_json::to_string(&LngLat::new(24.0297, 49.8397)).unwrap();
        assert_eq!(json, "[24.0297,49.8397]");
        let back: LngLat = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lat, 49.8397);
    }
}
