//! The marker layer: one [`StackMarker`] per pin group.
//!
//! At most one marker is expanded at a time; it is drawn above the rest.

use foundation::ids::NodeIds;
use foundation::time::Timestamp;
use runtime::pointer::{PointerDown, PointerRegistry};

use crate::grouping::PinGroup;
use crate::layer::{Anchor, Layer, LayerId, OverlayPlacement};
use crate::marker::{MarkerEvent, StackMarker};
use crate::marker_list::InputModality;

pub const BASE_Z: i32 = 1;
pub const RAISED_Z: i32 = 1000;

#[derive(Debug)]
pub struct PinLayer {
    id: LayerId,
    ids: NodeIds,
    modality: InputModality,
    markers: Vec<StackMarker>,
    raised: Option<usize>,
}

impl PinLayer {
    pub fn new(id: LayerId, modality: InputModality) -> Self {
        Self {
            id,
            ids: NodeIds::new(),
            modality,
            markers: Vec::new(),
            raised: None,
        }
    }

    pub fn modality(&self) -> InputModality {
        self.modality
    }

    /// Replaces every marker. Open lists are dropped with their markers;
    /// returns the index of the marker that was expanded, if any.
    pub fn set_groups(&mut self, groups: &[PinGroup]) -> Option<usize> {
        let lowered = self.raised.take();
        self.markers = groups
            .iter()
            .cloned()
            .map(|g| StackMarker::new(g, &mut self.ids, self.modality))
            .collect();
        lowered
    }

    pub fn markers(&self) -> &[StackMarker] {
        &self.markers
    }

    pub fn marker(&self, index: usize) -> Option<&StackMarker> {
        self.markers.get(index)
    }

    /// Index of the expanded marker, if any.
    pub fn raised(&self) -> Option<usize> {
        self.raised
    }

    pub fn activate(
        &mut self,
        index: usize,
        registry: &PointerRegistry,
        now: Timestamp,
    ) -> Option<MarkerEvent> {
        if self.raised.is_some_and(|r| r != index) {
            self.close_list();
        }
        let ev = self.markers.get_mut(index)?.activate(registry, now);
        self.track(index, ev.as_ref());
        ev
    }

    /// Row `row` of the expanded marker's list.
    pub fn pick(&mut self, row: usize) -> Option<MarkerEvent> {
        let index = self.raised?;
        let ev = self.markers.get_mut(index)?.select_from_list(row);
        if ev.is_some() {
            self.raised = None;
        }
        ev
    }

    pub fn close_list(&mut self) -> Option<MarkerEvent> {
        let index = self.raised.take()?;
        self.markers.get_mut(index)?.close()
    }

    /// Close request from the expanded marker's list overlay.
    pub fn dismiss_list(&mut self) -> Option<MarkerEvent> {
        let index = self.raised?;
        let ev = self.markers.get_mut(index)?.dismiss_list();
        self.track(index, ev.as_ref());
        ev
    }

    /// Dispatches a document press to the expanded marker's list.
    pub fn pointer_down(
        &mut self,
        registry: &PointerRegistry,
        ev: &PointerDown,
    ) -> Option<MarkerEvent> {
        let index = self.raised?;
        let fired = registry.dispatch(ev);
        let out = self.markers.get_mut(index)?.on_outside_press(&fired);
        self.track(index, out.as_ref());
        out
    }

    pub fn hover(&mut self, index: usize, hovered: bool) {
        if let Some(m) = self.markers.get_mut(index) {
            m.hover(hovered);
        }
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.markers.iter().find_map(StackMarker::tooltip)
    }

    fn track(&mut self, index: usize, ev: Option<&MarkerEvent>) {
        match ev {
            Some(MarkerEvent::Raised) => self.raised = Some(index),
            Some(MarkerEvent::Lowered) if self.raised == Some(index) => self.raised = None,
            _ => {}
        }
    }
}

impl Layer for PinLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn placements(&self) -> Vec<OverlayPlacement> {
        self.markers
            .iter()
            .enumerate()
            .map(|(i, m)| OverlayPlacement {
                node: m.node(),
                position: m.group().position(),
                anchor: Anchor::Bottom,
                z_index: if self.raised == Some(i) { RAISED_Z } else { BASE_Z },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_pins;
    use crate::pin::{GeoPin, PinKind};
    use pretty_assertions::assert_eq;

    fn layer() -> PinLayer {
        let pins = vec![
            GeoPin::new("1", PinKind::Artist, Some(48.3794), Some(31.1656), "one"),
            GeoPin::new("2", PinKind::Event, Some(48.3794), Some(31.1656), "two"),
            GeoPin::new("3", PinKind::Artist, Some(50.0), Some(30.0), "three"),
            GeoPin::new("4", PinKind::Artist, Some(50.0), Some(30.0), "four"),
        ];
        let mut layer = PinLayer::new(LayerId(1), InputModality::Pointer);
        layer.set_groups(&group_pins(&pins));
        layer
    }

    fn z_order(layer: &PinLayer) -> Vec<i32> {
        layer.placements().iter().map(|p| p.z_index).collect()
    }

    #[test]
    fn expanded_marker_is_drawn_on_top() {
        let reg = PointerRegistry::new();
        let mut l = layer();
        assert_eq!(z_order(&l), vec![BASE_Z, BASE_Z]);

        l.activate(1, &reg, Timestamp(0));
        assert_eq!(l.raised(), Some(1));
        assert_eq!(z_order(&l), vec![BASE_Z, RAISED_Z]);

        l.activate(1, &reg, Timestamp(10));
        assert_eq!(z_order(&l), vec![BASE_Z, BASE_Z]);
    }

    #[test]
    fn opening_another_stack_closes_the_first() {
        let reg = PointerRegistry::new();
        let mut l = layer();
        l.activate(0, &reg, Timestamp(0));
        l.activate(1, &reg, Timestamp(10));
        assert_eq!(l.raised(), Some(1));
        assert!(!l.marker(0).unwrap().is_expanded());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn pick_and_outside_press_lower_the_marker() {
        let reg = PointerRegistry::new();
        let mut l = layer();
        l.activate(0, &reg, Timestamp(0));
        let ev = l.pick(0);
        assert!(matches!(ev, Some(MarkerEvent::PinSelected(ref p)) if p.id == "1"));
        assert_eq!(l.raised(), None);

        l.activate(0, &reg, Timestamp(1_000));
        let ev = l.pointer_down(&reg, &PointerDown::on_background(Timestamp(2_000)));
        assert_eq!(ev, Some(MarkerEvent::Lowered));
        assert_eq!(l.raised(), None);
        assert!(reg.is_empty());
    }

    #[test]
    fn list_dismissal_lowers_the_marker() {
        let reg = PointerRegistry::new();
        let mut l = layer();
        assert_eq!(l.dismiss_list(), None);
        l.activate(1, &reg, Timestamp(0));
        assert_eq!(l.dismiss_list(), Some(MarkerEvent::Lowered));
        assert_eq!(l.raised(), None);
        assert!(!l.marker(1).unwrap().is_expanded());
        assert!(reg.is_empty());
    }

    #[test]
    fn regrouping_releases_listeners() {
        let reg = PointerRegistry::new();
        let mut l = layer();
        l.activate(0, &reg, Timestamp(0));
        assert_eq!(l.set_groups(&[]), Some(0));
        assert!(reg.is_empty());
        assert_eq!(l.set_groups(&[]), None);
        assert!(l.placements().is_empty());
    }
}
