pub mod precision;

pub use precision::*;
