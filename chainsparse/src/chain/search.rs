//! Directional search over the entry chain
//!
//! A search walks strictly in one direction from a starting node and
//! stops at the first node that matches or overshoots the target offset,
//! or at the end of the chain. Callers that start near the target pay only
//! for the true distance.

use super::{Chain, NodeId};
use std::cmp::Ordering;

/// Where a directional search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Landing {
    /// Matched node, or the last node visited on a miss
    pub(crate) node: NodeId,
    /// Whether `node` holds the target offset
    pub(crate) matched: bool,
    /// Number of links followed
    pub(crate) steps: u64,
}

impl Chain {
    /// Walk `next` links toward increasing offsets
    pub(crate) fn search_forward(&self, start: NodeId, target: usize) -> Landing {
        let mut current = start;
        let mut steps = 0;

        loop {
            let node = &self[current];
            if node.offset >= target {
                return Landing {
                    node: current,
                    matched: node.offset == target,
                    steps,
                };
            }

            match node.next {
                Some(next) => {
                    current = next;
                    steps += 1;
                }
                None => {
                    return Landing {
                        node: current,
                        matched: false,
                        steps,
                    }
                }
            }
        }
    }

    /// Walk `prev` links toward decreasing offsets
    pub(crate) fn search_reverse(&self, start: NodeId, target: usize) -> Landing {
        let mut current = start;
        let mut steps = 0;

        loop {
            let node = &self[current];
            if node.offset <= target {
                return Landing {
                    node: current,
                    matched: node.offset == target,
                    steps,
                };
            }

            match node.prev {
                Some(prev) => {
                    current = prev;
                    steps += 1;
                }
                None => {
                    return Landing {
                        node: current,
                        matched: false,
                        steps,
                    }
                }
            }
        }
    }

    /// Search from `start` in whichever direction leads to `target`
    pub(crate) fn search_from(&self, start: NodeId, target: usize) -> Landing {
        match self[start].offset.cmp(&target) {
            Ordering::Less => self.search_forward(start, target),
            Ordering::Greater => self.search_reverse(start, target),
            Ordering::Equal => Landing {
                node: start,
                matched: true,
                steps: 0,
            },
        }
    }
}
