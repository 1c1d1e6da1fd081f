//! Stack marker: one map marker per [`PinGroup`].
//!
//! Singletons select their pin directly. Stacks toggle a [`MarkerList`]
//! showing every member; while expanded the marker asks to be drawn above
//! its neighbours.

use foundation::ids::{NodeId, NodeIds};
use foundation::time::Timestamp;
use runtime::pointer::{ListenerId, PointerRegistry};

use crate::grouping::PinGroup;
use crate::marker_list::{InputModality, ListOutcome, MarkerList};
use crate::pin::GeoPin;
use crate::symbology::MarkerVisual;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MarkerState {
    #[default]
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerEvent {
    /// Expanded; draw above other markers.
    Raised,
    /// Collapsed again; restore normal stacking.
    Lowered,
    PinSelected(GeoPin),
}

#[derive(Debug)]
pub struct StackMarker {
    group: PinGroup,
    node: NodeId,
    state: MarkerState,
    hovered: bool,
    list: Option<MarkerList>,
}

impl StackMarker {
    pub fn new(group: PinGroup, ids: &mut NodeIds, modality: InputModality) -> Self {
        let node = ids.next_id();
        let list = group.is_stack().then(|| {
            MarkerList::new(group.members().to_vec(), modality, ids.next_id(), node)
        });
        Self {
            group,
            node,
            state: MarkerState::Collapsed,
            hovered: false,
            list,
        }
    }

    pub fn group(&self) -> &PinGroup {
        &self.group
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn state(&self) -> MarkerState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == MarkerState::Expanded
    }

    /// Member list; `None` for singletons.
    pub fn list(&self) -> Option<&MarkerList> {
        self.list.as_ref()
    }

    pub fn visual(&self) -> Option<MarkerVisual> {
        let face = self.group.first()?;
        Some(MarkerVisual::new(
            face,
            self.group.len(),
            self.is_expanded(),
            self.hovered,
        ))
    }

    pub fn hover(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Name of the face pin while hovered.
    pub fn tooltip(&self) -> Option<&str> {
        if !self.hovered {
            return None;
        }
        self.group.first().map(|p| p.name.as_str())
    }

    /// Click or tap on the marker body.
    pub fn activate(&mut self, registry: &PointerRegistry, now: Timestamp) -> Option<MarkerEvent> {
        let Some(list) = self.list.as_mut() else {
            return self.group.first().cloned().map(MarkerEvent::PinSelected);
        };
        match self.state {
            MarkerState::Collapsed => {
                list.open(registry, now);
                self.state = MarkerState::Expanded;
                Some(MarkerEvent::Raised)
            }
            MarkerState::Expanded => self.close(),
        }
    }

    /// Collapses the marker. Returns `Lowered` only if it was expanded.
    pub fn close(&mut self) -> Option<MarkerEvent> {
        if let Some(list) = self.list.as_mut() {
            list.close();
        }
        match std::mem::take(&mut self.state) {
            MarkerState::Expanded => Some(MarkerEvent::Lowered),
            MarkerState::Collapsed => None,
        }
    }

    /// Picks list row `index`. Selection and collapse happen together.
    pub fn select_from_list(&mut self, index: usize) -> Option<MarkerEvent> {
        let list = self.list.as_mut()?;
        match list.pick(index)? {
            ListOutcome::Selected(pin) => {
                self.state = MarkerState::Collapsed;
                Some(MarkerEvent::PinSelected(pin))
            }
            ListOutcome::Dismissed => self.close(),
        }
    }

    /// Close affordance or backdrop of the list.
    pub fn dismiss_list(&mut self) -> Option<MarkerEvent> {
        self.list.as_mut()?.dismiss()?;
        self.close()
    }

    /// Feeds a dispatched document press to the open list.
    pub fn on_outside_press(&mut self, fired: &[ListenerId]) -> Option<MarkerEvent> {
        match self.list.as_mut()?.on_outside_press(fired)? {
            ListOutcome::Dismissed => self.close(),
            ListOutcome::Selected(pin) => Some(MarkerEvent::PinSelected(pin)),
        }
    }
}
