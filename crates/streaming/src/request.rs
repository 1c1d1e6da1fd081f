/// Identifies one pin fetch.
///
/// Ids increase monotonically per tracker, so a higher id is always the more
/// recent request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Request(pub u64);
