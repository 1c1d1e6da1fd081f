//! Keeps the map camera in step with the selected region.
//!
//! Region selections arriving before the map has loaded are held back; only
//! the most recent one is applied once the surface reports ready. Surface
//! failures are logged and swallowed, never surfaced to the caller.

use std::time::Duration;

use catalog::{RegionKey, lookup_region};
use foundation::GeoBounds;

use crate::surface::{MapSurface, SurfaceError};
use crate::viewport::{CameraConstraints, DEFAULT_CENTER, DEFAULT_ZOOM, ViewportState};

pub const FIT_PADDING_PX: u32 = 50;
pub const CAMERA_DURATION: Duration = Duration::from_millis(1000);
/// Basemap label language.
pub const MAP_LANGUAGE: &str = "uk";

/// Where the camera was last sent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CameraTarget {
    Region(RegionKey),
    /// Whole-territory default view.
    Territory,
}

#[derive(Debug)]
pub struct MapViewportController {
    viewport: ViewportState,
    constraints: CameraConstraints,
    padding_px: u32,
    duration: Duration,
    ready: bool,
    applied: Option<CameraTarget>,
    pending: Option<Option<String>>,
}

impl Default for MapViewportController {
    fn default() -> Self {
        Self::new(CameraConstraints::default())
    }
}

impl MapViewportController {
    pub fn new(constraints: CameraConstraints) -> Self {
        Self {
            viewport: constraints.clamp(ViewportState::default()),
            constraints,
            padding_px: FIT_PADDING_PX,
            duration: CAMERA_DURATION,
            ready: false,
            applied: None,
            pending: None,
        }
    }

    pub fn with_padding(mut self, padding_px: u32) -> Self {
        self.padding_px = padding_px;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn constraints(&self) -> &CameraConstraints {
        &self.constraints
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn applied(&self) -> Option<CameraTarget> {
        self.applied
    }

    /// Selection waiting for the map to load.
    pub fn pending(&self) -> Option<Option<&str>> {
        self.pending.as_ref().map(Option::as_deref)
    }

    /// The surface finished loading. Runs once per mount.
    pub fn on_load<S: MapSurface>(&mut self, surface: &mut S) {
        if self.ready {
            return;
        }
        self.ready = true;
        if let Err(err) = surface.set_constraints(&self.constraints) {
            tracing::warn!(%err, "failed to apply camera constraints");
        }
        if let Err(err) = surface.set_language(MAP_LANGUAGE) {
            tracing::warn!(%err, lang = MAP_LANGUAGE, "map labels not localized");
        }
        if let Some(key) = self.pending.take() {
            self.select_region(surface, key.as_deref());
        }
    }

    /// The map widget went away; a later mount starts from scratch.
    pub fn unmount(&mut self) {
        self.ready = false;
        self.applied = None;
        self.pending = None;
    }

    /// Moves the camera to `key`, or to the whole territory when the key is
    /// absent or unknown.
    pub fn select_region<S: MapSurface>(&mut self, surface: &mut S, key: Option<&str>) {
        if !self.ready {
            tracing::debug!(region = ?key, "map not loaded, deferring region");
            self.pending = Some(key.map(str::to_string));
            return;
        }

        let region = lookup_region(key);
        if region.is_none() && key.is_some_and(|k| !k.trim().is_empty()) {
            tracing::debug!(region = ?key, "unknown region, showing whole territory");
        }
        let target = region.map_or(CameraTarget::Territory, |r| CameraTarget::Region(r.key));
        if self.applied == Some(target) {
            return;
        }

        let framed = region.and_then(|r| Some((self.constraints.clip(&r.bounds)?, r.zoom)));
        let result = match framed {
            Some((bounds, zoom)) => self.fit(surface, bounds, zoom),
            None => self.fly_home(surface),
        };
        match result {
            Ok(view) => {
                self.applied = Some(target);
                self.viewport = view;
            }
            Err(err) => tracing::warn!(%err, region = ?key, "camera move failed"),
        }
    }

    /// Camera moved by a user gesture; the surface already clamped it.
    pub fn on_move(&mut self, viewport: ViewportState) {
        self.viewport = self.constraints.clamp(viewport);
    }

    fn fit<S: MapSurface>(
        &self,
        surface: &mut S,
        bounds: GeoBounds,
        zoom: f64,
    ) -> Result<ViewportState, SurfaceError> {
        surface.fit_bounds(bounds, self.padding_px, self.duration)?;
        Ok(ViewportState::new(bounds.center(), self.constraints.clamp_zoom(zoom)))
    }

    fn fly_home<S: MapSurface>(
        &self,
        surface: &mut S,
    ) -> Result<ViewportState, SurfaceError> {
        let zoom = self.constraints.clamp_zoom(DEFAULT_ZOOM);
        let center = self.constraints.max_bounds.clamp(DEFAULT_CENTER);
        surface.fly_to(center, zoom, self.duration)?;
        Ok(ViewportState::new(center, zoom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CameraCommand, RecordingSurface};
    use pretty_assertions::assert_eq;

    fn loaded() -> (MapViewportController, RecordingSurface) {
        let mut c = MapViewportController::default();
        let mut s = RecordingSurface::new();
        c.on_load(&mut s);
        s.take();
        (c, s)
    }

    #[test]
    fn lviv_fits_its_bounds_with_padding() {
        let (mut c, mut s) = loaded();
        c.select_region(&mut s, Some("LVIV"));
        assert_eq!(
            s.commands(),
            &[CameraCommand::FitBounds {
                bounds: GeoBounds::from_corners([[22.5, 49.0], [25.5, 50.7]]),
                padding_px: 50,
                duration_ms: 1000,
            }]
        );
        assert_eq!(c.applied(), Some(CameraTarget::Region(RegionKey::Lviv)));
    }

    #[test]
    fn unknown_or_missing_region_flies_home() {
        for key in [Some("NONEXISTENT_KEY"), None, Some("")] {
            let (mut c, mut s) = loaded();
            c.select_region(&mut s, key);
            assert_eq!(
                s.commands(),
                &[CameraCommand::FlyTo {
                    center: DEFAULT_CENTER,
                    zoom: DEFAULT_ZOOM,
                    duration_ms: 1000,
                }]
            );
        }
    }

    #[test]
    fn commands_before_load_are_deferred_and_only_latest_flushed() {
        let mut c = MapViewportController::default();
        let mut s = RecordingSurface::new();
        c.select_region(&mut s, Some("KYIV"));
        c.select_region(&mut s, Some("LVIV"));
        assert!(s.commands().is_empty());
        assert_eq!(c.pending(), Some(Some("LVIV")));

        c.on_load(&mut s);
        assert_eq!(s.camera_moves().len(), 1);
        assert!(matches!(
            s.camera_moves()[0],
            CameraCommand::FitBounds { bounds, .. } if bounds.min.lng == 22.5
        ));
        assert_eq!(c.pending(), None);
    }

    #[test]
    fn constraints_are_configured_once() {
        let mut c = MapViewportController::default();
        let mut s = RecordingSurface::new();
        c.on_load(&mut s);
        c.on_load(&mut s);
        let setups = s
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, CameraCommand::SetConstraints(_)))
            .count();
        assert_eq!(setups, 1);
        assert!(s.commands().contains(&CameraCommand::SetLanguage { lang: "uk".into() }));
    }

    #[test]
    fn localization_failure_is_not_fatal() {
        let mut c = MapViewportController::default();
        let mut s = RecordingSurface::without_localization();
        c.select_region(&mut s, Some("ODESA"));
        c.on_load(&mut s);
        assert!(c.is_ready());
        assert_eq!(s.camera_moves().len(), 1);
    }

    #[test]
    fn reselecting_applied_region_is_a_no_op() {
        let (mut c, mut s) = loaded();
        c.select_region(&mut s, Some("KYIV"));
        c.select_region(&mut s, Some("KYIV"));
        assert_eq!(s.camera_moves().len(), 1);
        c.select_region(&mut s, None);
        c.select_region(&mut s, Some("UNKNOWN"));
        assert_eq!(s.camera_moves().len(), 2);
    }

    #[test]
    fn edge_regions_are_clipped_to_world_bounds() {
        let (mut c, mut s) = loaded();
        c.select_region(&mut s, Some("ZAKARPATTIA"));
        let [CameraCommand::FitBounds { bounds, .. }] = s.commands() else {
            panic!("expected one fit, got {:?}", s.commands());
        };
        assert!(c.constraints().max_bounds.contains_bounds(bounds));
        assert_eq!(bounds.min.lng, 22.1371);
    }

    #[test]
    fn user_moves_are_clamped() {
        let (mut c, _) = loaded();
        c.on_move(ViewportState {
            latitude: 50.0,
            longitude: 30.0,
            zoom: 2.0,
        });
        assert_eq!(c.viewport().zoom, 5.5);
    }

    #[test]
    fn unmount_forgets_state() {
        let (mut c, mut s) = loaded();
        c.select_region(&mut s, Some("SUMY"));
        c.unmount();
        assert!(!c.is_ready());
        c.select_region(&mut s, Some("SUMY"));
        assert_eq!(c.pending(), Some(Some("SUMY")));
    }
}
