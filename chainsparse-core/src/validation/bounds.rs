//! Coordinate and conformability validation

use crate::{MatrixError, Shape};

/// Validate a coordinate against a shape
pub const fn validate_index(shape: &Shape, row: usize, column: usize) -> Result<(), MatrixError> {
    if !shape.contains(row, column) {
        return Err(MatrixError::IndexOutOfBounds);
    }
    Ok(())
}

/// Validate that two operands can be added element-wise
pub fn validate_same_shape(a: &Shape, b: &Shape) -> Result<(), MatrixError> {
    if a != b {
        return Err(MatrixError::DimensionMismatch);
    }
    Ok(())
}

/// Validate that `a * b` is defined and return the shape of the product
pub fn validate_multiply_shapes(a: &Shape, b: &Shape) -> Result<Shape, MatrixError> {
    if a.columns() != b.rows() {
        return Err(MatrixError::DimensionMismatch);
    }
    Shape::new(a.rows(), b.columns())
}
