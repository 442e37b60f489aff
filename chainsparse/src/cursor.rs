//! Traversal cursors
//!
//! A [`Cursor`] is a caller-held handle to one entry of a matrix. Passing
//! the cursor returned by one access into the next lets the lookup resume
//! from there instead of from an end of the chain.
//!
//! Cursors never own anything and never make a result wrong. Each cursor
//! remembers the offset of the entry it was taken from; when it is handed
//! back, the matrix checks that the entry still exists at that offset. A
//! cursor whose entry has since been removed (or a cursor from another
//! matrix) is silently replaced by a freshly synthesized one, which only
//! costs traversal time.

use crate::chain::NodeId;

/// Handle to an entry of a [`Matrix`](crate::Matrix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    node: NodeId,
    offset: usize,
}

impl Cursor {
    pub(crate) fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }

    pub(crate) fn node(&self) -> NodeId {
        self.node
    }

    /// Linear offset of the entry this cursor was taken from
    pub fn offset(&self) -> usize {
        self.offset
    }
}
