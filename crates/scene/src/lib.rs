pub mod config;
pub mod controller;
pub mod map;
pub mod surface;
pub mod viewport;

pub use config::MapConfig;
pub use controller::{CameraTarget, MapViewportController};
pub use map::{MapEvent, MapScene};
pub use surface::{CameraCommand, MapSurface, RecordingSurface, SurfaceError};
pub use viewport::{CameraConstraints, ViewportState};
