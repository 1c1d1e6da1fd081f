use serde::{Deserialize, Serialize};

use crate::geo::LngLat;

/// Axis-aligned geographic bounding box.
///
/// Serialized as `[[minLng, minLat], [maxLng, maxLat]]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct GeoBounds {
    pub min: LngLat,
    pub max: LngLat,
}

impl GeoBounds {
    pub const fn new(min: LngLat, max: LngLat) -> Self {
        GeoBounds { min, max }
    }

    /// Builds bounds from `[[minLng, minLat], [maxLng, maxLat]]`.
    pub const fn from_corners(c: [[f64; 2]; 2]) -> Self {
        GeoBounds {
            min: LngLat::new(c[0][0], c[0][1]),
            max: LngLat::new(c[1][0], c[1][1]),
        }
    }

    pub fn as_corners(&self) -> [[f64; 2]; 2] {
        [self.min.as_array(), self.max.as_array()]
    }

    /// Non-degenerate and ordered (`min <= max` on both axes).
    pub fn is_valid(&self) -> bool {
        self.min.is_valid()
            && self.max.is_valid()
            && self.min.lng <= self.max.lng
            && self.min.lat <= self.max.lat
    }

    pub fn width_deg(&self) -> f64 {
        self.max.lng - self.min.lng
    }

    pub fn height_deg(&self) -> f64 {
        self.max.lat - self.min.lat
    }

    pub fn center(&self) -> LngLat {
        LngLat::new(
            0.5 * (self.min.lng + self.max.lng),
            0.5 * (self.min.lat + self.max.lat),
        )
    }

    pub fn contains(&self, p: LngLat) -> bool {
        (self.min.lng..=self.max.lng).contains(&p.lng)
            && (self.min.lat..=self.max.lat).contains(&p.lat)
    }

    pub fn contains_bounds(&self, other: &GeoBounds) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Clamps `p` into these bounds.
    pub fn clamp(&self, p: LngLat) -> LngLat {
        LngLat::new(
            p.lng.clamp(self.min.lng, self.max.lng),
            p.lat.clamp(self.min.lat, self.max.lat),
        )
    }

    /// Intersection of two boxes, `None` if they do not overlap.
    pub fn intersect(&self, other: &GeoBounds) -> Option<GeoBounds> {
        let out = GeoBounds::new(
            LngLat::new(
                self.min.lng.max(other.min.lng),
                self.min.lat.max(other.min.lat),
            ),
            LngLat::new(
                self.max.lng.min(other.max.lng),
                self.max.lat.min(other.max.lat),
            ),
        );
        (out.min.lng <= out.max.lng && out.min.lat <= out.max.lat).then_some(out)
    }
}

impl From<[[f64; 2]; 2]> for GeoBounds {
    fn from(c: [[f64; 2]; 2]) -> Self {
        GeoBounds::from_corners(c)
    }
}

impl From<GeoBounds> for [[f64; 2]; 2] {
    fn from(b: GeoBounds) -> Self {
        b.as_corners()
    }
}

#[cfg(test)]
mod tests {
    use super::GeoBounds;
    use crate::geo::LngLat;

    #[test]
    fn intersect_trims_to_the_overlap() {
        let world = GeoBounds::from_corners([[22.1371, 44.3614], [40.2275, 52.3791]]);
        let region = GeoBounds::from_corners([[22.1, 47.9], [24.6, 49.1]]);
        let clipped = world.intersect(&region).unwrap();
        assert_eq!(clipped.as_corners(), [[22.1371, 47.9], [24.6, 49.1]]);

        let inside = GeoBounds::from_corners([[22.5, 49.0], [25.5, 50.7]]);
        assert_eq!(world.intersect(&inside), Some(inside));
        assert!(world.contains_bounds(&inside));
    }

    #[test]
    fn disjoint_boxes_have_no_intersection() {
        let a = GeoBounds::from_corners([[0.0, 0.0], [1.0, 1.0]]);
        let b = GeoBounds::from_corners([[2.0, 2.0], [3.0, 3.0]]);
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn clamp_and_center() {
        let b = GeoBounds::from_corners([[20.0, 40.0], [30.0, 50.0]]);
        assert_eq!(b.center(), LngLat::new(25.0, 45.0));
        assert_eq!(b.clamp(LngLat::new(35.0, 39.0)), LngLat::new(30.0, 40.0));
        assert!(b.is_valid());
        assert!(!GeoBounds::from_corners([[30.0, 40.0], [20.0, 50.0]]).is_valid());
    }
}
