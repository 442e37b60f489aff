//! Read-only views over a matrix's entries
//!
//! These traits expose stored cells without cursors, for callers that only
//! need random access or whole rows and columns.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Random access to the stored cells of a matrix
pub trait SparseMatrix {
    type Element: Copy + PartialEq;

    /// Look up the cell at `(row, col)` with no cursor
    ///
    /// Every call is a cold lookup from the nearer end of the storage.
    /// Cells without an entry and coordinates outside the shape both
    /// give `None`.
    fn get_element(&self, row: usize, col: usize) -> Option<Self::Element>;

    /// `(rows, columns)`
    fn dimensions(&self) -> (usize, usize);

    /// Number of stored entries
    fn nnz(&self) -> usize;
}

/// Whole-row and whole-column extraction
#[cfg(feature = "alloc")]
pub trait MatrixOperations: SparseMatrix {
    /// Stored values of `row_index`, left to right
    ///
    /// Empty when the row is out of range or holds no entries.
    fn get_row(&self, row_index: usize) -> Vec<Self::Element>;

    /// Stored values of `col_index`, top to bottom
    ///
    /// Empty when the column is out of range or holds no entries.
    fn get_col(&self, col_index: usize) -> Vec<Self::Element>;
}
