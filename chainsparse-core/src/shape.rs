//! Matrix dimensions and linear offset arithmetic
//!
//! Every stored cell is addressed by its linear offset
//! `row * columns + column`. A [`Shape`] is only constructible when the
//! full offset space `rows * columns` fits in `usize`, so offset
//! computations on in-range coordinates never overflow.

use crate::{MatrixError, Result};

/// Fixed `rows x columns` dimensions of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    rows: usize,
    columns: usize,
}

impl Shape {
    /// Create a shape, rejecting dimensions whose cell count overflows
    pub const fn new(rows: usize, columns: usize) -> Result<Self> {
        match rows.checked_mul(columns) {
            Some(_) => Ok(Self { rows, columns }),
            None => Err(MatrixError::ShapeOverflow),
        }
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells, `rows * columns`
    pub const fn len(&self) -> usize {
        self.rows * self.columns
    }

    /// Whether the shape has no cells at all
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset splitting the front half of the matrix from the back half
    ///
    /// Lookups for offsets strictly above the midpoint start from the
    /// tail of the entry chain, all others from the head.
    pub const fn midpoint(&self) -> usize {
        self.len() / 2
    }

    /// Check that a coordinate lies inside the matrix
    pub const fn contains(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns
    }

    /// Linear offset of an in-range coordinate
    pub const fn offset(&self, row: usize, column: usize) -> Result<usize> {
        if !self.contains(row, column) {
            return Err(MatrixError::IndexOutOfBounds);
        }
        Ok(row * self.columns + column)
    }

    /// Coordinate `(row, column)` of a linear offset
    pub const fn position(&self, offset: usize) -> Result<(usize, usize)> {
        if offset >= self.len() {
            return Err(MatrixError::IndexOutOfBounds);
        }
        Ok((offset / self.columns, offset % self.columns))
    }

    /// Half-open offset range `[start, end)` covered by one row
    pub const fn row_span(&self, row: usize) -> Result<(usize, usize)> {
        if row >= self.rows {
            return Err(MatrixError::IndexOutOfBounds);
        }
        let start = row * self.columns;
        Ok((start, start + self.columns))
    }
}

impl core::fmt::Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}
