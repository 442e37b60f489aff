//! Matrix arithmetic over the cursor protocol
//!
//! Both operations visit cells in row-major order and thread one cursor per
//! operand through the whole traversal, so each access resumes where the
//! previous one on the same matrix stopped.

use crate::matrix::Matrix;
use chainsparse_core::validation::{validate_multiply_shapes, validate_same_shape};
use chainsparse_core::Result;
use log::debug;

/// Add `b` into `a` element-wise and return `a`
///
/// Fails with [`DimensionMismatch`](chainsparse_core::MatrixError::DimensionMismatch)
/// unless both shapes are equal. Storage for every entry of `b` is reserved
/// before the first write, so a failed call leaves `a` unchanged.
pub fn add<'a>(a: &'a mut Matrix, b: &Matrix) -> Result<&'a mut Matrix> {
    validate_same_shape(&a.shape(), &b.shape())?;
    a.reserve(b.nnz())?;

    debug!(
        "adding {} matrices: {} + {} entries",
        a.shape(),
        a.nnz(),
        b.nnz()
    );

    let mut cursor_a = None;
    let mut cursor_b = None;
    for row in 0..a.rows() {
        for column in 0..a.columns() {
            let (x, landing_a) = a.get(cursor_a, row, column)?;
            let (y, next_b) = b.get(cursor_b, row, column)?;
            cursor_b = next_b;

            // Nothing stored and nothing to store
            if x == 0.0 && y == 0.0 {
                cursor_a = landing_a;
                continue;
            }

            // The write starts where the read of `a` landed
            cursor_a = a.set(landing_a, row, column, x + y)?;
        }
    }

    debug!(
        "addition done: {} entries, {} steps",
        a.nnz(),
        a.stats().steps
    );
    Ok(a)
}

/// Multiply `a` by `b` into a new matrix
///
/// Fails with [`DimensionMismatch`](chainsparse_core::MatrixError::DimensionMismatch)
/// unless `a.columns() == b.rows()`. The product inherits `a`'s
/// configuration. Every output cell is computed as a full dot product;
/// cells whose sum is exactly zero are never stored.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let shape = validate_multiply_shapes(&a.shape(), &b.shape())?;
    let mut result = Matrix::with_config(shape.rows(), shape.columns(), a.config().clone())?;

    debug!(
        "multiplying {} by {} ({} x {} entries)",
        a.shape(),
        b.shape(),
        a.nnz(),
        b.nnz()
    );

    let mut cursor_a = None;
    let mut cursor_b = None;
    let mut cursor_result = None;
    for i in 0..a.rows() {
        for j in 0..b.columns() {
            let mut sum = 0.0;
            for k in 0..a.columns() {
                let (x, next_a) = a.get(cursor_a, i, k)?;
                let (y, next_b) = b.get(cursor_b, k, j)?;
                cursor_a = next_a;
                cursor_b = next_b;
                sum += x * y;
            }
            cursor_result = result.set(cursor_result, i, j, sum)?;
        }
    }

    debug!(
        "multiplication done: {} entries in {} result",
        result.nnz(),
        result.shape()
    );
    Ok(result)
}
