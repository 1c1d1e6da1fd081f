/// Lifecycle of one cached query result.
///
/// InFlight → Ready, or InFlight → Failed. A new request for the same query
/// moves it back to InFlight while keeping any earlier pins.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FetchState {
    InFlight,
    Ready,
    Failed,
}
