/// Identifies one node of the UI tree (a marker, an overlay panel, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(n: u64) -> Self {
        NodeId(n)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic `NodeId` source.
#[derive(Debug, Default)]
pub struct NodeIds {
    next: u64,
}

impl NodeIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}
