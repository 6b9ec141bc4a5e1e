//! Node identifier allocation.

/// Identifier of a template node
pub type NodeId = u64;

/// Monotonic id source for template nodes
///
/// Owned by the graph and handed by `&mut` to every node creation, so no
/// two nodes of one graph can share an id.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    last: NodeId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id, starting at 1
    pub fn next_id(&mut self) -> NodeId {
        self.last += 1;
        self.last
    }

    /// Number of ids handed out so far
    pub fn allocated(&self) -> u64 {
        self.last
    }
}
