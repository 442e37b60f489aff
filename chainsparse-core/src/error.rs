//! Error types for sparse matrix operations

/// Errors that can occur during sparse matrix operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Row or column outside the matrix dimensions
    IndexOutOfBounds,
    /// Operand shapes are not conformable for the operation
    DimensionMismatch,
    /// `rows * columns` does not fit in `usize`
    ShapeOverflow,
    /// Entry storage could not be allocated
    AllocationFailure,
    /// Entry chain failed a structural check
    CorruptedChain,
}

impl core::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            MatrixError::IndexOutOfBounds => "Index out of range",
            MatrixError::DimensionMismatch => "Matrix dimensions are not conformable",
            MatrixError::ShapeOverflow => "Matrix shape overflows the offset space",
            MatrixError::AllocationFailure => "Failed to allocate entry storage",
            MatrixError::CorruptedChain => "Entry chain is corrupted",
        };
        write!(f, "{msg}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatrixError {}

/// Result type for sparse matrix operations
pub type Result<T> = core::result::Result<T, MatrixError>;
