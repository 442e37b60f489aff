//! Matrix configuration

/// What a write of `0.0` does to a cell that already holds an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZeroWritePolicy {
    /// Unlink and free the entry, so the cell reads back as zero
    #[default]
    Remove,
    /// Leave the entry untouched; zero writes never change storage
    ///
    /// A cell that was non-zero keeps its old value. Element-wise sums that
    /// cancel to zero therefore leave the left operand's value in place.
    Retain,
}

/// Configuration for a [`Matrix`](crate::Matrix)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixConfig {
    /// Handling of zero writes to stored cells
    pub zero_write: ZeroWritePolicy,
    /// Number of entries to allocate room for at construction
    pub initial_capacity: usize,
}

impl MatrixConfig {
    /// Create config with an initial entry capacity
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Self::default()
        }
    }

    /// Set the zero-write policy
    pub fn with_zero_write(mut self, policy: ZeroWritePolicy) -> Self {
        self.zero_write = policy;
        self
    }

    /// Get the zero-write policy
    pub fn zero_write(&self) -> ZeroWritePolicy {
        self.zero_write
    }

    /// Get the initial entry capacity
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            zero_write: ZeroWritePolicy::Remove,
            initial_capacity: 0,
        }
    }
}
