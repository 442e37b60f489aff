//! Per-matrix traversal counters

/// Counters describing how much chain walking a matrix has done
///
/// Purely informational. The counters never influence results, but make
/// the cost of cold versus cursor-anchored access measurable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraversalStats {
    /// Links followed by directional searches
    pub steps: u64,
    /// Searches started (reads and writes on a non-empty chain)
    pub lookups: u64,
    /// Entries spliced into the chain
    pub insertions: u64,
    /// Entries unlinked from the chain
    pub removals: u64,
}

impl TraversalStats {
    /// Average links followed per lookup
    pub fn steps_per_lookup(&self) -> f64 {
        if self.lookups == 0 {
            return 0.0;
        }
        self.steps as f64 / self.lookups as f64
    }
}
