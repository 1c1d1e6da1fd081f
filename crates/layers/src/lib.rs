pub mod grouping;
pub mod layer;
pub mod marker;
pub mod marker_list;
pub mod pin;
pub mod pin_layer;
pub mod preview;
pub mod symbology;

pub use grouping::{GroupingMemo, PinGroup, group_pins};
pub use layer::*;
pub use marker::{MarkerEvent, MarkerState, StackMarker};
pub use marker_list::{InputModality, ListOutcome, MarkerList, Presentation};
pub use pin::{GeoPin, PinKind};
pub use pin_layer::PinLayer;
pub use preview::PinPreview;
