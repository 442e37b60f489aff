//! Offset-ordered entry chain
//!
//! Non-zero entries live in an index arena. Each slot holds at most one
//! node, and live nodes are linked into a doubly linked chain sorted by
//! linear offset. Slots vacated by removal are recycled through a free list,
//! so node ids are only stable while the node they name is alive.

mod search;

pub(crate) use search::Landing;

use chainsparse_core::{MatrixError, Result};
use std::ops::{Index, IndexMut};

/// Index of a node slot in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// One stored non-zero cell plus its chain links
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Node {
    pub(crate) value: f64,
    pub(crate) offset: usize,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

/// Arena-backed doubly linked chain of entries
#[derive(Debug, Default)]
pub(crate) struct Chain {
    slots: Vec<Option<Node>>,
    free_slots: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl Chain {
    /// Create an empty chain with room for `capacity` nodes
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        let mut chain = Self::default();
        chain.reserve(capacity)?;
        Ok(chain)
    }

    /// Nodes the arena holds without reallocating
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// Return `id` if it still names a live node at `offset`
    pub(crate) fn resolve(&self, id: NodeId, offset: usize) -> Option<NodeId> {
        match self.slots.get(id.0) {
            Some(Some(node)) if node.offset == offset => Some(id),
            _ => None,
        }
    }

    /// Make room for `additional` insertions without further allocation
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<()> {
        let needed = additional.saturating_sub(self.free_slots.len());
        self.slots
            .try_reserve(needed)
            .map_err(|_| MatrixError::AllocationFailure)
    }

    fn allocate(&mut self, node: Node) -> Result<NodeId> {
        if let Some(index) = self.free_slots.pop() {
            self.slots[index] = Some(node);
            return Ok(NodeId(index));
        }

        self.slots
            .try_reserve(1)
            .map_err(|_| MatrixError::AllocationFailure)?;
        self.slots.push(Some(node));
        Ok(NodeId(self.slots.len() - 1))
    }

    fn insert_sole(&mut self, offset: usize, value: f64) -> Result<NodeId> {
        if !self.is_empty() {
            return Err(MatrixError::CorruptedChain);
        }

        let id = self.allocate(Node {
            value,
            offset,
            prev: None,
            next: None,
        })?;
        self.head = Some(id);
        self.tail = Some(id);
        self.len = 1;
        Ok(id)
    }

    /// Splice a new node immediately before `anchor`
    ///
    /// With no anchor the chain must be empty and the node becomes both
    /// head and tail.
    pub(crate) fn insert_before(
        &mut self,
        anchor: Option<NodeId>,
        offset: usize,
        value: f64,
    ) -> Result<NodeId> {
        let Some(anchor) = anchor else {
            return self.insert_sole(offset, value);
        };

        let prev = self[anchor].prev;
        let id = self.allocate(Node {
            value,
            offset,
            prev,
            next: Some(anchor),
        })?;

        match prev {
            Some(prev) => self[prev].next = Some(id),
            None => self.head = Some(id),
        }
        self[anchor].prev = Some(id);
        self.len += 1;

        Ok(id)
    }

    /// Splice a new node immediately after `anchor`
    ///
    /// With no anchor the chain must be empty and the node becomes both
    /// head and tail.
    pub(crate) fn insert_after(
        &mut self,
        anchor: Option<NodeId>,
        offset: usize,
        value: f64,
    ) -> Result<NodeId> {
        let Some(anchor) = anchor else {
            return self.insert_sole(offset, value);
        };

        let next = self[anchor].next;
        let id = self.allocate(Node {
            value,
            offset,
            prev: Some(anchor),
            next,
        })?;

        match next {
            Some(next) => self[next].prev = Some(id),
            None => self.tail = Some(id),
        }
        self[anchor].next = Some(id);
        self.len += 1;

        Ok(id)
    }

    /// Unlink a node and recycle its slot, returning the removed node
    pub(crate) fn remove(&mut self, id: NodeId) -> Node {
        let node = self[id];

        match node.prev {
            Some(prev) => self[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self[next].prev = node.prev,
            None => self.tail = node.prev,
        }

        self.slots[id.0] = None;
        self.free_slots.push(id.0);
        self.len -= 1;

        node
    }

    /// Walk the chain head to tail
    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            chain: self,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Walk the chain head to tail starting at `start`
    pub(crate) fn iter_from(&self, start: Option<NodeId>) -> Iter<'_> {
        Iter {
            chain: self,
            current: start,
            remaining: self.len,
        }
    }

    /// Copy the live nodes into a fresh arena laid out in chain order
    pub(crate) fn compacted(&self) -> Self {
        let len = self.len;
        let slots = self
            .iter()
            .enumerate()
            .map(|(index, node)| {
                Some(Node {
                    value: node.value,
                    offset: node.offset,
                    prev: index.checked_sub(1).map(NodeId),
                    next: (index + 1 < len).then_some(NodeId(index + 1)),
                })
            })
            .collect();

        Self {
            slots,
            free_slots: Vec::new(),
            head: (len > 0).then_some(NodeId(0)),
            tail: len.checked_sub(1).map(NodeId),
            len,
        }
    }

    /// Check every structural invariant of the chain
    ///
    /// Offsets must be strictly increasing and below `offset_limit`, links
    /// must be symmetric, boundaries must match `head`/`tail`, no value may
    /// be zero, and the number of reachable nodes must equal `len`.
    pub(crate) fn validate(&self, offset_limit: usize) -> Result<()> {
        if self.head.is_none() != self.tail.is_none() {
            return Err(MatrixError::CorruptedChain);
        }

        let mut count = 0;
        let mut prev: Option<NodeId> = None;
        let mut last_offset: Option<usize> = None;
        let mut current = self.head;

        while let Some(id) = current {
            let node = match self.slots.get(id.0) {
                Some(Some(node)) => node,
                _ => return Err(MatrixError::CorruptedChain),
            };

            let ordered = last_offset.map_or(true, |last| node.offset > last);
            if node.prev != prev || !ordered || node.offset >= offset_limit || node.value == 0.0 {
                return Err(MatrixError::CorruptedChain);
            }

            count += 1;
            // Guards against cycles
            if count > self.len {
                return Err(MatrixError::CorruptedChain);
            }

            last_offset = Some(node.offset);
            prev = Some(id);
            current = node.next;
        }

        if prev != self.tail || count != self.len {
            return Err(MatrixError::CorruptedChain);
        }

        Ok(())
    }
}

impl Index<NodeId> for Chain {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.slots[id.0]
            .as_ref()
            .expect("chain link points at a vacant slot")
    }
}

impl IndexMut<NodeId> for Chain {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.0]
            .as_mut()
            .expect("chain link points at a vacant slot")
    }
}

/// Iterator over live nodes in offset order
pub(crate) struct Iter<'a> {
    chain: &'a Chain,
    current: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let chain = self.chain;
        let node = &chain[self.current?];
        self.current = node.next;
        self.remaining -= 1;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(chain: &Chain) -> Vec<usize> {
        chain.iter().map(|node| node.offset).collect()
    }

    #[test]
    fn test_insert_into_empty_chain() {
        let mut chain = Chain::default();
        let id = chain.insert_after(None, 4, 1.5).unwrap();

        assert_eq!(chain.head(), Some(id));
        assert_eq!(chain.tail(), Some(id));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.validate(10), Ok(()));
    }

    #[test]
    fn test_insert_updates_boundaries() {
        let mut chain = Chain::default();
        let middle = chain.insert_before(None, 5, 1.0).unwrap();
        let first = chain.insert_before(Some(middle), 2, 2.0).unwrap();
        let last = chain.insert_after(Some(middle), 8, 3.0).unwrap();

        assert_eq!(chain.head(), Some(first));
        assert_eq!(chain.tail(), Some(last));
        assert_eq!(offsets(&chain), vec![2, 5, 8]);

        // Interior splices leave the boundaries alone
        chain.insert_after(Some(first), 3, 4.0).unwrap();
        chain.insert_before(Some(last), 7, 5.0).unwrap();
        assert_eq!(chain.head(), Some(first));
        assert_eq!(chain.tail(), Some(last));
        assert_eq!(offsets(&chain), vec![2, 3, 5, 7, 8]);
        assert_eq!(chain.validate(10), Ok(()));
    }

    #[test]
    fn test_anchorless_insert_into_populated_chain_is_rejected() {
        let mut chain = Chain::default();
        chain.insert_after(None, 1, 1.0).unwrap();

        assert_eq!(
            chain.insert_after(None, 2, 1.0),
            Err(MatrixError::CorruptedChain)
        );
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_remove_and_recycle() {
        let mut chain = Chain::default();
        let a = chain.insert_after(None, 1, 1.0).unwrap();
        let b = chain.insert_after(Some(a), 2, 2.0).unwrap();
        let c = chain.insert_after(Some(b), 3, 3.0).unwrap();

        let removed = chain.remove(b);
        assert_eq!(removed.offset, 2);
        assert_eq!(removed.prev, Some(a));
        assert_eq!(removed.next, Some(c));
        assert_eq!(offsets(&chain), vec![1, 3]);
        assert_eq!(chain.resolve(b, 2), None);

        // The vacated slot is reused for the next node
        let d = chain.insert_after(Some(c), 9, 4.0).unwrap();
        assert_eq!(d, b);
        assert_eq!(chain.resolve(d, 2), None);
        assert_eq!(chain.resolve(d, 9), Some(d));

        chain.remove(a);
        chain.remove(c);
        chain.remove(d);
        assert!(chain.is_empty());
        assert_eq!(chain.head(), None);
        assert_eq!(chain.tail(), None);
        assert_eq!(chain.validate(10), Ok(()));
    }

    #[test]
    fn test_compacted_preserves_order() {
        let mut chain = Chain::default();
        let a = chain.insert_after(None, 10, 1.0).unwrap();
        let b = chain.insert_before(Some(a), 4, 2.0).unwrap();
        chain.insert_before(Some(b), 1, 3.0).unwrap();
        chain.remove(a);

        let compact = chain.compacted();
        assert_eq!(offsets(&compact), vec![1, 4]);
        assert_eq!(compact.slots.len(), 2);
        assert_eq!(compact.validate(20), Ok(()));
    }

    #[test]
    fn test_validate_detects_corruption() {
        let mut chain = Chain::default();
        let a = chain.insert_after(None, 1, 1.0).unwrap();
        let b = chain.insert_after(Some(a), 2, 2.0).unwrap();

        assert_eq!(chain.validate(2), Err(MatrixError::CorruptedChain));

        chain[b].offset = 0;
        assert_eq!(chain.validate(10), Err(MatrixError::CorruptedChain));

        chain[b].offset = 2;
        chain[b].value = 0.0;
        assert_eq!(chain.validate(10), Err(MatrixError::CorruptedChain));

        chain[b].value = 2.0;
        chain[b].prev = None;
        assert_eq!(chain.validate(10), Err(MatrixError::CorruptedChain));
    }
}
