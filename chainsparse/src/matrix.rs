//! Cursor-addressed sparse matrix
//!
//! A [`Matrix`] stores only its non-zero cells, as entries of a chain
//! sorted by linear offset `row * columns + column`. Every read and write
//! takes an optional [`Cursor`] and returns a new one:
//!
//! - With no cursor, the search starts from the chain tail when the target
//!   lies in the back half of the offset space, otherwise from the head.
//! - With a cursor, the search starts at the cursor's entry and walks
//!   toward the target, so accesses in increasing offset order each cost
//!   only the distance from the previous one.
//! - A read that misses returns `0.0` together with a cursor to the entry
//!   where the search stopped, so a following write to the same cell
//!   splices its entry in without searching again.

use crate::chain::{self, Chain, Landing, NodeId};
use crate::config::{MatrixConfig, ZeroWritePolicy};
use crate::cursor::Cursor;
use crate::stats::TraversalStats;
use chainsparse_core::{MatrixOperations, Result, Shape, SparseMatrix};
use log::{trace, warn};
use std::cell::Cell;
use std::fmt;

/// Sparse `f64` matrix with fixed dimensions
pub struct Matrix {
    shape: Shape,
    chain: Chain,
    config: MatrixConfig,
    stats: Cell<TraversalStats>,
}

impl Matrix {
    /// Create an empty `rows x columns` matrix with default configuration
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        Self::with_config(rows, columns, MatrixConfig::default())
    }

    /// Create an empty `rows x columns` matrix
    pub fn with_config(rows: usize, columns: usize, config: MatrixConfig) -> Result<Self> {
        let shape = Shape::new(rows, columns)?;
        let chain = Chain::with_capacity(config.initial_capacity.min(shape.len()))?;

        Ok(Self {
            shape,
            chain,
            config,
            stats: Cell::default(),
        })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn columns(&self) -> usize {
        self.shape.columns()
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.chain.len()
    }

    /// Whether no entry is stored
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Fraction of cells holding an entry
    pub fn density(&self) -> f64 {
        if self.shape.is_empty() {
            return 0.0;
        }
        self.nnz() as f64 / self.shape.len() as f64
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    /// Traversal counters accumulated since creation or the last reset
    pub fn stats(&self) -> TraversalStats {
        self.stats.get()
    }

    pub fn reset_stats(&self) {
        self.stats.set(TraversalStats::default());
    }

    /// Make room for `additional` new entries up front
    ///
    /// After a successful reservation, that many insertions cannot fail
    /// for lack of memory.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.chain.reserve(additional)
    }

    /// Entries the matrix can hold before its storage grows
    pub fn capacity(&self) -> usize {
        self.chain.capacity()
    }

    /// Coordinate of the entry a cursor was taken from
    pub fn position(&self, cursor: Cursor) -> Result<(usize, usize)> {
        self.shape.position(cursor.offset())
    }

    /// Read the value at `(row, column)`
    ///
    /// Returns the value (`0.0` for cells without an entry) and a cursor to
    /// pass into the next access. The cursor is `None` only when the matrix
    /// holds no entries.
    pub fn get(
        &self,
        cursor: Option<Cursor>,
        row: usize,
        column: usize,
    ) -> Result<(f64, Option<Cursor>)> {
        let target = self.shape.offset(row, column)?;

        let Some(landing) = self.locate(cursor, target) else {
            return Ok((0.0, None));
        };

        let node = &self.chain[landing.node];
        let value = if landing.matched { node.value } else { 0.0 };
        Ok((value, Some(Cursor::new(landing.node, node.offset))))
    }

    /// Write `value` at `(row, column)`
    ///
    /// A non-zero value overwrites the existing entry or splices a new one
    /// next to where the search stopped, and the returned cursor points at
    /// that entry. A zero value never creates an entry; whether it removes
    /// an existing one is decided by the configured [`ZeroWritePolicy`].
    /// When a zero write changes nothing, the input cursor is returned.
    pub fn set(
        &mut self,
        cursor: Option<Cursor>,
        row: usize,
        column: usize,
        value: f64,
    ) -> Result<Option<Cursor>> {
        let target = self.shape.offset(row, column)?;

        if value == 0.0 {
            return Ok(self.discard(cursor, target));
        }

        let Some(landing) = self.locate(cursor, target) else {
            let id = self.chain.insert_after(None, target, value)?;
            self.note_insertion(target);
            return Ok(Some(Cursor::new(id, target)));
        };

        if landing.matched {
            self.chain[landing.node].value = value;
            return Ok(Some(Cursor::new(landing.node, target)));
        }

        let id = if target < self.chain[landing.node].offset {
            self.chain.insert_before(Some(landing.node), target, value)?
        } else {
            self.chain.insert_after(Some(landing.node), target, value)?
        };
        self.note_insertion(target);

        Ok(Some(Cursor::new(id, target)))
    }

    /// Iterate stored entries as `(row, column, value)` in row-major order
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            shape: self.shape,
            nodes: self.chain.iter(),
        }
    }

    /// Check the structural invariants of the entry chain
    pub fn validate(&self) -> Result<()> {
        self.chain.validate(self.shape.len()).map_err(|err| {
            warn!("matrix {} failed validation: {err}", self.shape);
            err
        })
    }

    fn discard(&mut self, cursor: Option<Cursor>, target: usize) -> Option<Cursor> {
        if self.config.zero_write == ZeroWritePolicy::Retain {
            return cursor;
        }

        let landing = match self.locate(cursor, target) {
            Some(landing) if landing.matched => landing,
            _ => return cursor,
        };

        let removed = self.chain.remove(landing.node);
        self.record(|stats| stats.removals += 1);
        trace!(
            "removed entry at offset {target} ({} entries left)",
            self.chain.len()
        );

        removed
            .prev
            .or(removed.next)
            .map(|id| Cursor::new(id, self.chain[id].offset))
    }

    /// Run a directional search toward `target`
    ///
    /// Returns `None` only when the chain is empty.
    fn locate(&self, cursor: Option<Cursor>, target: usize) -> Option<Landing> {
        let start = cursor
            .and_then(|cursor| self.chain.resolve(cursor.node(), cursor.offset()))
            .or_else(|| self.synthesize(target))?;

        let landing = self.chain.search_from(start, target);
        self.record(|stats| {
            stats.lookups += 1;
            stats.steps += landing.steps;
        });

        Some(landing)
    }

    /// Pick the chain end closer to `target`
    fn synthesize(&self, target: usize) -> Option<NodeId> {
        if target > self.shape.midpoint() {
            self.chain.tail()
        } else {
            self.chain.head()
        }
    }

    fn note_insertion(&self, target: usize) {
        self.record(|stats| stats.insertions += 1);
        trace!(
            "inserted entry at offset {target} ({} entries)",
            self.chain.len()
        );
    }

    fn record(&self, update: impl FnOnce(&mut TraversalStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}

impl Clone for Matrix {
    /// Clones entries and configuration; counters start from zero
    fn clone(&self) -> Self {
        Self {
            shape: self.shape,
            chain: self.chain.compacted(),
            config: self.config.clone(),
            stats: Cell::default(),
        }
    }
}

impl PartialEq for Matrix {
    /// Matrices are equal when they have the same shape and entries
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.iter().eq(other.iter())
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("shape", &self.shape)
            .field("nnz", &self.nnz())
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl SparseMatrix for Matrix {
    type Element = f64;

    fn get_element(&self, row: usize, col: usize) -> Option<f64> {
        self.get(None, row, col)
            .ok()
            .map(|(value, _)| value)
            .filter(|value| *value != 0.0)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.rows(), self.columns())
    }

    fn nnz(&self) -> usize {
        self.chain.len()
    }
}

impl MatrixOperations for Matrix {
    fn get_row(&self, row_index: usize) -> Vec<f64> {
        let Ok((start, end)) = self.shape.row_span(row_index) else {
            return Vec::new();
        };
        let Some(landing) = self.locate(None, start) else {
            return Vec::new();
        };

        // A miss may land just before the row
        let node = &self.chain[landing.node];
        let first = if node.offset >= start {
            Some(landing.node)
        } else {
            node.next
        };

        self.chain
            .iter_from(first)
            .take_while(|node| node.offset < end)
            .map(|node| node.value)
            .collect()
    }

    fn get_col(&self, col_index: usize) -> Vec<f64> {
        if col_index >= self.columns() {
            return Vec::new();
        }

        let mut values = Vec::new();
        let mut cursor = None;
        for row in 0..self.rows() {
            if let Ok((value, next)) = self.get(cursor, row, col_index) {
                cursor = next;
                if value != 0.0 {
                    values.push(value);
                }
            }
        }
        values
    }
}

/// Iterator over the entries of a [`Matrix`] in row-major order
pub struct Entries<'a> {
    shape: Shape,
    nodes: chain::Iter<'a>,
}

impl Iterator for Entries<'_> {
    type Item = (usize, usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.next()?;
        let (row, column) = self.shape.position(node.offset).ok()?;
        Some((row, column, node.value))
    }
}

impl<'a> IntoIterator for &'a Matrix {
    type Item = (usize, usize, f64);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainsparse_core::MatrixError;

    fn filled(rows: usize, columns: usize, entries: &[(usize, usize, f64)]) -> Matrix {
        let mut matrix = Matrix::new(rows, columns).unwrap();
        for &(row, column, value) in entries {
            matrix.set(None, row, column, value).unwrap();
        }
        matrix
    }

    #[test]
    fn test_empty_matrix_reads_zero() {
        let matrix = Matrix::new(3, 3).unwrap();

        assert_eq!(matrix.get(None, 1, 1), Ok((0.0, None)));
        assert!(matrix.is_empty());
        assert_eq!(matrix.stats().lookups, 0);
    }

    #[test]
    fn test_read_after_write() {
        let mut matrix = Matrix::new(4, 5).unwrap();
        let cursor = matrix.set(None, 2, 3, 7.5).unwrap().unwrap();

        assert_eq!(matrix.position(cursor), Ok((2, 3)));
        assert_eq!(matrix.get(None, 2, 3).unwrap().0, 7.5);
        assert_eq!(matrix.get(Some(cursor), 2, 3).unwrap().0, 7.5);
        assert_eq!(matrix.nnz(), 1);
    }

    #[test]
    fn test_overwrite_in_place() {
        let mut matrix = filled(2, 2, &[(1, 0, 1.0)]);
        matrix.set(None, 1, 0, -4.0).unwrap();

        assert_eq!(matrix.nnz(), 1);
        assert_eq!(matrix.get(None, 1, 0).unwrap().0, -4.0);
        assert_eq!(matrix.stats().insertions, 1);
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let mut matrix = Matrix::new(2, 3).unwrap();

        assert_eq!(matrix.get(None, 2, 0), Err(MatrixError::IndexOutOfBounds));
        assert_eq!(matrix.get(None, 0, 3), Err(MatrixError::IndexOutOfBounds));
        assert_eq!(
            matrix.set(None, 5, 5, 1.0),
            Err(MatrixError::IndexOutOfBounds)
        );
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_shape_overflow() {
        assert_eq!(
            Matrix::new(usize::MAX, 3).unwrap_err(),
            MatrixError::ShapeOverflow
        );
    }

    #[test]
    fn test_miss_returns_landing_cursor() {
        let matrix = filled(1, 10, &[(0, 2, 1.0), (0, 6, 2.0)]);
        let (value, cursor) = matrix.get(None, 0, 4).unwrap();

        assert_eq!(value, 0.0);
        let (_, column) = matrix.position(cursor.unwrap()).unwrap();
        assert!(column == 2 || column == 6);
    }

    #[test]
    fn test_insertion_keeps_offset_order() {
        let mut matrix = Matrix::new(3, 3).unwrap();
        let mut cursor = None;
        for (row, column) in [(1, 1), (0, 0), (2, 2), (0, 2), (2, 0), (1, 0)] {
            cursor = matrix.set(cursor, row, column, 1.0 + row as f64).unwrap();
        }

        let offsets: Vec<_> = matrix.iter().map(|(r, c, _)| r * 3 + c).collect();
        assert_eq!(offsets, vec![0, 2, 3, 4, 6, 8]);
        assert_eq!(matrix.validate(), Ok(()));
    }

    #[test]
    fn test_cold_lookup_starts_from_closer_end() {
        let entries: Vec<_> = (0..10).map(|column| (0, column, 1.0)).collect();
        let matrix = filled(1, 10, &entries);

        matrix.reset_stats();
        matrix.get(None, 0, 9).unwrap();
        assert_eq!(matrix.stats().steps, 0);

        matrix.reset_stats();
        matrix.get(None, 0, 1).unwrap();
        assert_eq!(matrix.stats().steps, 1);

        // Offset 5 is the midpoint itself and starts from the head
        matrix.reset_stats();
        matrix.get(None, 0, 5).unwrap();
        assert_eq!(matrix.stats().steps, 5);
    }

    #[test]
    fn test_warm_cursor_saves_steps() {
        let entries: Vec<_> = (0..20).map(|column| (0, column, 2.0)).collect();
        let matrix = filled(1, 20, &entries);

        matrix.reset_stats();
        let mut cursor = None;
        for column in 0..20 {
            let (value, next) = matrix.get(cursor, 0, column).unwrap();
            assert_eq!(value, 2.0);
            cursor = next;
        }
        let warm = matrix.stats().steps;

        matrix.reset_stats();
        for column in 0..20 {
            matrix.get(None, 0, column).unwrap();
        }
        let cold = matrix.stats().steps;

        assert!(warm < cold, "warm {warm} should beat cold {cold}");
        assert_eq!(warm, 19);
    }

    #[test]
    fn test_zero_write_removes_entry() {
        let mut matrix = filled(2, 2, &[(0, 0, 1.0), (0, 1, 2.0), (1, 1, 3.0)]);

        let cursor = matrix.set(None, 0, 1, 0.0).unwrap();
        assert_eq!(matrix.nnz(), 2);
        assert_eq!(matrix.get(None, 0, 1).unwrap().0, 0.0);
        assert_eq!(matrix.position(cursor.unwrap()), Ok((0, 0)));
        assert_eq!(matrix.stats().removals, 1);

        matrix.set(None, 0, 0, 0.0).unwrap();
        let last = matrix.set(None, 1, 1, 0.0).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(last, None);
        assert_eq!(matrix.validate(), Ok(()));
    }

    #[test]
    fn test_zero_write_to_absent_cell_is_noop() {
        let mut matrix = filled(2, 2, &[(1, 1, 3.0)]);
        let cursor = matrix.get(None, 1, 1).unwrap().1;

        assert_eq!(matrix.set(cursor, 0, 0, 0.0), Ok(cursor));
        assert_eq!(matrix.set(None, 0, 1, 0.0), Ok(None));
        assert_eq!(matrix.nnz(), 1);
    }

    #[test]
    fn test_zero_write_retained_under_retain_policy() {
        let config = MatrixConfig::default().with_zero_write(ZeroWritePolicy::Retain);
        let mut matrix = Matrix::with_config(2, 2, config).unwrap();
        let cursor = matrix.set(None, 0, 1, 2.0).unwrap();

        assert_eq!(matrix.set(cursor, 0, 1, 0.0), Ok(cursor));
        assert_eq!(matrix.get(None, 0, 1).unwrap().0, 2.0);
        assert_eq!(matrix.nnz(), 1);
    }

    #[test]
    fn test_stale_cursor_after_removal() {
        let mut matrix = filled(1, 8, &[(0, 1, 1.0), (0, 4, 4.0), (0, 6, 6.0)]);
        let stale = matrix.get(None, 0, 4).unwrap().1;

        matrix.set(None, 0, 4, 0.0).unwrap();
        // Slot is recycled for a different offset
        matrix.set(None, 0, 7, 7.0).unwrap();

        assert_eq!(matrix.get(stale, 0, 4).unwrap().0, 0.0);
        assert_eq!(matrix.get(stale, 0, 6).unwrap().0, 6.0);
        assert_eq!(matrix.get(stale, 0, 7).unwrap().0, 7.0);

        let cursor = matrix.set(stale, 0, 4, 9.0).unwrap();
        assert_eq!(matrix.position(cursor.unwrap()), Ok((0, 4)));
        assert_eq!(matrix.validate(), Ok(()));
    }

    #[test]
    fn test_cursor_from_other_matrix() {
        let other = filled(3, 3, &[(2, 2, 5.0)]);
        let foreign = other.get(None, 2, 2).unwrap().1;
        let mut matrix = filled(3, 3, &[(0, 0, 1.0)]);

        assert_eq!(matrix.get(foreign, 0, 0).unwrap().0, 1.0);
        matrix.set(foreign, 1, 1, 2.0).unwrap();
        assert_eq!(matrix.get(None, 1, 1).unwrap().0, 2.0);
        assert_eq!(matrix.validate(), Ok(()));
    }

    #[test]
    fn test_clone_and_eq() {
        let mut matrix = filled(3, 4, &[(0, 1, 1.0), (2, 3, 2.0), (1, 0, 3.0)]);
        matrix.set(None, 1, 0, 0.0).unwrap();

        let copy = matrix.clone();
        assert_eq!(copy, matrix);
        assert_eq!(copy.stats(), TraversalStats::default());
        assert_eq!(copy.validate(), Ok(()));

        let other_shape = filled(4, 3, &[(0, 1, 1.0), (2, 2, 2.0)]);
        assert_ne!(other_shape, matrix);
    }

    #[test]
    fn test_rows_and_columns() {
        let matrix = filled(3, 3, &[(0, 0, 1.0), (1, 0, 2.0), (1, 2, 3.0), (2, 1, 4.0)]);

        assert_eq!(matrix.get_row(1), vec![2.0, 3.0]);
        assert_eq!(matrix.get_row(0), vec![1.0]);
        assert!(matrix.get_row(3).is_empty());
        assert_eq!(matrix.get_col(0), vec![1.0, 2.0]);
        assert_eq!(matrix.get_col(1), vec![4.0]);
        assert!(matrix.get_col(3).is_empty());

        let sparse = filled(3, 3, &[(2, 2, 1.0)]);
        assert!(sparse.get_row(1).is_empty());
        assert_eq!(sparse.get_row(2), vec![1.0]);
    }

    #[test]
    fn test_failed_reservation_leaves_matrix_unchanged() {
        let mut matrix = filled(3, 3, &[(0, 0, 1.0), (2, 2, 5.0)]);

        assert_eq!(matrix.reserve(usize::MAX), Err(MatrixError::AllocationFailure));
        assert_eq!(matrix.nnz(), 2);
        assert_eq!(matrix, filled(3, 3, &[(0, 0, 1.0), (2, 2, 5.0)]));
        assert_eq!(matrix.validate(), Ok(()));
        assert_eq!(matrix.reserve(16), Ok(()));
    }

    #[test]
    fn test_initial_capacity() {
        let huge = MatrixConfig::with_capacity(usize::MAX);
        assert_eq!(
            Matrix::with_config(1, usize::MAX, huge.clone()).unwrap_err(),
            MatrixError::AllocationFailure
        );

        // Capped at the number of cells
        let mut matrix = Matrix::with_config(4, 4, huge).unwrap();
        let capacity = matrix.capacity();
        assert!(capacity >= 16);
        for index in 0..4 {
            matrix.set(None, index, index, 1.0).unwrap();
        }
        assert_eq!(matrix.capacity(), capacity);

        let matrix = Matrix::with_config(4, 4, MatrixConfig::with_capacity(6)).unwrap();
        assert!(matrix.capacity() >= 6);
    }

    #[test]
    fn test_sparse_matrix_trait() {
        let matrix = filled(2, 3, &[(1, 2, 8.0)]);

        assert_eq!(matrix.get_element(1, 2), Some(8.0));
        assert_eq!(matrix.get_element(0, 0), None);
        assert_eq!(matrix.get_element(9, 9), None);
        assert_eq!(matrix.dimensions(), (2, 3));
        assert_eq!(SparseMatrix::nnz(&matrix), 1);
    }

    #[test]
    fn test_density_and_iter() {
        let matrix = filled(2, 2, &[(1, 1, 4.0), (0, 0, 1.0)]);

        assert_eq!(matrix.density(), 0.5);
        let entries: Vec<_> = (&matrix).into_iter().collect();
        assert_eq!(entries, vec![(0, 0, 1.0), (1, 1, 4.0)]);
        assert_eq!(Matrix::new(0, 4).unwrap().density(), 0.0);
    }
}
