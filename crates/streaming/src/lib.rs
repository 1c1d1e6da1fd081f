pub mod protocol;
pub mod query;
pub mod request;
pub mod residency;
pub mod tracker;

pub use protocol::*;
pub use query::*;
pub use request::*;
pub use residency::*;
pub use tracker::*;
