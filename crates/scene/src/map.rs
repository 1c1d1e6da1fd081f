//! The map page: filters, fetching, grouping, markers, preview and camera.

use foundation::ids::NodeId;
use foundation::time::Timestamp;
use layers::{
    GeoPin, GroupingMemo, InputModality, Layer, LayerId, MarkerEvent, PinLayer, PinPreview,
};
use runtime::{Event, EventBus, Frame, PointerDown, PointerRegistry};
use streaming::{FetchTracker, MapFilters, PinQuery, Request};

use crate::config::MapConfig;
use crate::controller::MapViewportController;
use crate::surface::MapSurface;

pub const PIN_LAYER: LayerId = LayerId(1);

/// What happened during a frame, for the host to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    FetchStarted { request: Request, query: PinQuery },
    PinsApplied { pins: usize, groups: usize },
    StaleResponseDropped(Request),
    FetchFailed(Request),
    MarkerRaised(usize),
    MarkerLowered(usize),
    PinSelected(GeoPin),
    Navigate(String),
}

#[derive(Debug)]
pub struct MapScene {
    config: MapConfig,
    filters: MapFilters,
    tracker: FetchTracker,
    memo: GroupingMemo,
    layer: PinLayer,
    preview: PinPreview,
    controller: MapViewportController,
    pointer: PointerRegistry,
    frame: Frame,
    events: EventBus<MapEvent>,
}

impl MapScene {
    pub fn new(config: MapConfig, modality: InputModality) -> Self {
        Self {
            config,
            filters: MapFilters::default(),
            tracker: FetchTracker::default(),
            memo: GroupingMemo::new(),
            layer: PinLayer::new(PIN_LAYER, modality),
            preview: PinPreview::new(),
            controller: MapViewportController::default(),
            pointer: PointerRegistry::new(),
            frame: Frame::first(),
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn filters(&self) -> &MapFilters {
        &self.filters
    }

    pub fn tracker(&self) -> &FetchTracker {
        &self.tracker
    }

    pub fn layer(&self) -> &PinLayer {
        &self.layer
    }

    pub fn preview(&self) -> &PinPreview {
        &self.preview
    }

    pub fn controller(&self) -> &MapViewportController {
        &self.controller
    }

    pub fn pointer_registry(&self) -> &PointerRegistry {
        &self.pointer
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Starts a new frame at `time`.
    pub fn advance(&mut self, time: Timestamp) -> Frame {
        self.frame = self.frame.advance_to(time);
        self.frame
    }

    pub fn drain_events(&mut self) -> Vec<Event<MapEvent>> {
        self.events.drain()
    }

    pub fn on_load<S: MapSurface>(&mut self, surface: &mut S) {
        self.controller.on_load(surface);
        self.place_markers(surface);
    }

    /// Applies new filters and starts a pin fetch. The camera only moves when
    /// the region changed.
    ///
    /// Pins already cached for the new query are shown right away.
    pub fn set_filters<S: MapSurface>(&mut self, surface: &mut S, filters: MapFilters) -> Request {
        if filters.region != self.filters.region {
            self.controller
                .select_region(surface, filters.region.as_deref());
        }
        let query = PinQuery::from(&filters);
        self.filters = filters;

        if let Some(pins) = self.tracker.cached(&query).map(<[GeoPin]>::to_vec) {
            self.show_pins(surface, &pins);
        }
        let request = self.tracker.begin(query.clone());
        self.events
            .emit(self.frame, MapEvent::FetchStarted { request, query });
        request
    }

    /// Delivers a fetch response. Returns `false` if it was stale.
    pub fn apply_pins<S: MapSurface>(
        &mut self,
        surface: &mut S,
        request: Request,
        pins: Vec<GeoPin>,
    ) -> bool {
        let Some(accepted) = self.tracker.complete(request, pins).map(<[GeoPin]>::to_vec) else {
            self.events
                .emit(self.frame, MapEvent::StaleResponseDropped(request));
            return false;
        };
        self.show_pins(surface, &accepted);
        true
    }

    pub fn fetch_failed(&mut self, request: Request) {
        if self.tracker.fail(request) {
            tracing::warn!(request = request.0, "pin fetch failed");
            self.events.emit(self.frame, MapEvent::FetchFailed(request));
        }
    }

    pub fn activate_marker(&mut self, index: usize) {
        if self.layer.raised().is_some_and(|open| open != index) {
            self.dismiss_list();
        }
        let ev = self.layer.activate(index, &self.pointer, self.frame.time);
        self.on_marker_event(index, ev);
    }

    /// Picks row `row` of the open marker list.
    pub fn pick_from_list(&mut self, row: usize) {
        let Some(index) = self.layer.raised() else {
            return;
        };
        let ev = self.layer.pick(row);
        self.on_marker_event(index, ev);
    }

    /// Close button, backdrop or escape on the open marker list.
    pub fn dismiss_list(&mut self) {
        if let Some(index) = self.layer.raised() {
            let ev = self.layer.dismiss_list();
            self.on_marker_event(index, ev);
        }
    }

    /// A press anywhere in the document; `path` is the target and its ancestors.
    pub fn pointer_down(&mut self, path: Vec<NodeId>) {
        let Some(index) = self.layer.raised() else {
            return;
        };
        let press = PointerDown::new(path, self.frame.time);
        let ev = self.layer.pointer_down(&self.pointer, &press);
        self.on_marker_event(index, ev);
    }

    pub fn hover_marker(&mut self, index: usize, hovered: bool) {
        self.layer.hover(index, hovered);
    }

    pub fn close_preview(&mut self) {
        self.preview.close();
    }

    /// Follows the preview's profile link, if it has one.
    pub fn view_profile(&mut self) -> Option<String> {
        let path = self.preview.view_profile()?;
        self.events
            .emit(self.frame, MapEvent::Navigate(path.clone()));
        Some(path)
    }

    fn show_pins<S: MapSurface>(&mut self, surface: &mut S, pins: &[GeoPin]) {
        let groups = self.memo.groups(pins);
        let count = groups.len();
        if let Some(index) = self.layer.set_groups(groups) {
            self.events.emit(self.frame, MapEvent::MarkerLowered(index));
        }
        self.events.emit(
            self.frame,
            MapEvent::PinsApplied {
                pins: pins.len(),
                groups: count,
            },
        );
        self.place_markers(surface);
    }

    fn place_markers<S: MapSurface>(&self, surface: &mut S) {
        if !self.controller.is_ready() {
            return;
        }
        for placement in self.layer.placements() {
            if let Err(err) = surface.place_overlay(&placement) {
                tracing::warn!(%err, node = placement.node.get(), "failed to place marker");
            }
        }
    }

    fn on_marker_event(&mut self, index: usize, ev: Option<MarkerEvent>) {
        let Some(ev) = ev else {
            return;
        };
        let out = match ev {
            MarkerEvent::Raised => MapEvent::MarkerRaised(index),
            MarkerEvent::Lowered => MapEvent::MarkerLowered(index),
            MarkerEvent::PinSelected(pin) => {
                self.preview.open(pin.clone());
                MapEvent::PinSelected(pin)
            }
        };
        self.events.emit(self.frame, out);
    }
}
