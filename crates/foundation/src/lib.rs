pub mod bounds;
pub mod geo;
pub mod ids;
pub mod math;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use geo::*;
pub use ids::*;
pub use time::*;
