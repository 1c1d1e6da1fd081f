pub mod event_bus;
pub mod frame;
pub mod pointer;

pub use event_bus::*;
pub use frame::*;
pub use pointer::*;
