//! Shape validation utilities
//!
//! Pure checks run before any operation touches entry storage, so that a
//! rejected operation leaves its operands untouched.

pub mod bounds;

pub use bounds::{validate_index, validate_multiply_shapes, validate_same_shape};
