use foundation::{GeoBounds, LngLat};
use serde::{Deserialize, Serialize};

/// Whole-territory view shown on first load and when no region is selected.
pub const DEFAULT_CENTER: LngLat = LngLat::new(31.1656, 48.3794);
pub const DEFAULT_ZOOM: f64 = 6.0;

/// The camera may not leave this box.
pub const WORLD_BOUNDS: GeoBounds =
    GeoBounds::from_corners([[22.1371, 44.3614], [40.2275, 52.3791]]);
pub const MIN_ZOOM: f64 = 5.5;
pub const MAX_ZOOM: f64 = 18.0;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

impl ViewportState {
    pub fn new(center: LngLat, zoom: f64) -> Self {
        Self {
            latitude: center.lat,
            longitude: center.lng,
            zoom,
        }
    }

    pub fn center(&self) -> LngLat {
        LngLat::new(self.longitude, self.latitude)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConstraints {
    pub max_bounds: GeoBounds,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            max_bounds: WORLD_BOUNDS,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl CameraConstraints {
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// `view` moved inside the constraints.
    pub fn clamp(&self, view: ViewportState) -> ViewportState {
        ViewportState::new(self.max_bounds.clamp(view.center()), self.clamp_zoom(view.zoom))
    }

    /// Part of `bounds` the camera is allowed to frame; `None` if disjoint.
    pub fn clip(&self, bounds: &GeoBounds) -> Option<GeoBounds> {
        self.max_bounds.intersect(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_inside_constraints() {
        let c = CameraConstraints::default();
        let v = ViewportState::default();
        assert_eq!(c.clamp(v), v);
        assert_eq!((v.latitude, v.longitude, v.zoom), (48.3794, 31.1656, 6.0));
    }

    #[test]
    fn clamp_pulls_camera_back() {
        let c = CameraConstraints::default();
        let far = ViewportState::new(LngLat::new(10.0, 60.0), 20.0);
        let v = c.clamp(far);
        assert_eq!((v.longitude, v.latitude, v.zoom), (22.1371, 52.3791, 18.0));
    }

    #[test]
    fn clip_trims_regions_past_the_edge() {
        let c = CameraConstraints::default();
        let zakarpattia = GeoBounds::from_corners([[22.1, 47.9], [24.6, 49.1]]);
        let clipped = c.clip(&zakarpattia).unwrap();
        assert_eq!(clipped.as_corners(), [[22.1371, 47.9], [24.6, 49.1]]);
        let outside = GeoBounds::from_corners([[0.0, 0.0], [1.0, 1.0]]);
        assert!(c.clip(&outside).is_none());
    }
}
