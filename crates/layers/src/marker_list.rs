//! Selectable list of a stack's members.
//!
//! Pointer input renders a popover anchored above the marker; touch input
//! renders a bottom sheet. Either way the caller gets one of two outcomes:
//! a selection (which also closes the list) or a dismissal.

use std::time::Duration;

use foundation::ids::NodeId;
use foundation::time::Timestamp;
use runtime::pointer::{ListenerId, OutsideListener, PointerRegistry};

use crate::pin::GeoPin;
use crate::symbology::Thumbnail;

/// Outside presses are ignored this long after opening, so the press that
/// opened the popover cannot also close it.
pub const OUTSIDE_CLICK_GRACE: Duration = Duration::from_millis(100);

/// Entry animation offset between consecutive rows.
pub const ROW_STAGGER: Duration = Duration::from_millis(50);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InputModality {
    #[default]
    Pointer,
    Touch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Floating panel above the marker.
    Popover,
    /// Bottom-anchored modal sheet.
    BottomSheet { title: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub pin_id: String,
    pub title: String,
    /// Style, or the lower-cased kind when no style is set.
    pub subtitle: Option<String>,
    pub thumbnail: Thumbnail,
    pub enter_delay: Duration,
}

impl ListRow {
    fn new(index: usize, pin: &GeoPin) -> Self {
        let subtitle = match pin.style.as_deref() {
            Some(s) if !s.is_empty() => Some(s.to_string()),
            _ => Some(pin.kind.as_str().to_lowercase()).filter(|s| !s.is_empty()),
        };
        Self {
            pin_id: pin.id.clone(),
            title: pin.name.clone(),
            subtitle,
            thumbnail: Thumbnail::for_pin(pin),
            enter_delay: ROW_STAGGER * index as u32,
        }
    }
}

/// Result of an interaction that closes the list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome {
    /// A row was picked; the list is already closed.
    Selected(GeoPin),
    Dismissed,
}

/// Sheet title, e.g. `"3 Locations at this spot"`.
pub fn sheet_title(count: usize) -> String {
    let noun = if count == 1 { "Location" } else { "Locations" };
    format!("{count} {noun} at this spot")
}

#[derive(Debug)]
pub struct MarkerList {
    members: Vec<GeoPin>,
    modality: InputModality,
    node: NodeId,
    anchor: NodeId,
    grace: Duration,
    open: bool,
    listener: Option<OutsideListener>,
}

impl MarkerList {
    /// `node` is the list's own subtree root, `anchor` the marker it belongs to.
    pub fn new(
        members: Vec<GeoPin>,
        modality: InputModality,
        node: NodeId,
        anchor: NodeId,
    ) -> Self {
        Self {
            members,
            modality,
            node,
            anchor,
            grace: OUTSIDE_CLICK_GRACE,
            open: false,
            listener: None,
        }
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn modality(&self) -> InputModality {
        self.modality
    }

    pub fn members(&self) -> &[GeoPin] {
        &self.members
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The document listener held while a popover is open.
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.listener.as_ref().map(OutsideListener::id)
    }

    pub fn presentation(&self) -> Presentation {
        match self.modality {
            InputModality::Pointer => Presentation::Popover,
            InputModality::Touch => Presentation::BottomSheet {
                title: sheet_title(self.members.len()),
            },
        }
    }

    /// Rows in member order.
    pub fn rows(&self) -> Vec<ListRow> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, p)| ListRow::new(i, p))
            .collect()
    }

    /// Opens the list. Popovers attach an outside-press listener armed after
    /// the grace delay; sheets rely on their own close affordance.
    pub fn open(&mut self, registry: &PointerRegistry, now: Timestamp) {
        if self.open {
            return;
        }
        self.open = true;
        if self.modality == InputModality::Pointer {
            self.listener =
                Some(registry.listen_outside(vec![self.node, self.anchor], now, self.grace));
        }
    }

    /// Closes the list and releases its listener. Idempotent.
    pub fn close(&mut self) {
        self.open = false;
        self.listener = None;
    }

    /// Picks row `index`: forwards the pin and closes in one step.
    pub fn pick(&mut self, index: usize) -> Option<ListOutcome> {
        if !self.open {
            return None;
        }
        let pin = self.members.get(index)?.clone();
        self.close();
        Some(ListOutcome::Selected(pin))
    }

    /// Close affordance, backdrop tap, or escape.
    pub fn dismiss(&mut self) -> Option<ListOutcome> {
        if !self.open {
            return None;
        }
        self.close();
        Some(ListOutcome::Dismissed)
    }

    /// Handles a dispatched document press; dismisses if our listener fired.
    pub fn on_outside_press(&mut self, fired: &[ListenerId]) -> Option<ListOutcome> {
        let id = self.listener_id()?;
        if fired.contains(&id) {
            self.dismiss()
        } else {
            None
        }
    }
}
