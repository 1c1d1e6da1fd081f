use foundation::LngLat;
use foundation::ids::NodeId;
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

pub trait Layer {
    fn id(&self) -> LayerId;

    /// Overlays to place on the map, in draw order.
    fn placements(&self) -> Vec<OverlayPlacement>;
}

/// Which point of the overlay element sits on its coordinate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    #[default]
    Bottom,
    Center,
}

/// A DOM-like element pinned to a map coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPlacement {
    #[serde(skip)]
    pub node: NodeId,
    pub position: LngLat,
    pub anchor: Anchor,
    pub z_index: i32,
}
