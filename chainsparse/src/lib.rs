//! chainsparse - cursor-addressed sparse matrices
//!
//! This library stores the non-zero cells of a fixed-size `f64` matrix in a
//! chain of entries ordered by linear offset, and addresses them through
//! reusable cursors that make sequential access cheap.
//!
//! ## Architecture
//!
//! - **chainsparse-core**: shapes, errors, validation and traits (no_std)
//! - **chainsparse**: the entry chain, cursor protocol and arithmetic
//!
//! ## Quick Start
//!
//! ```rust
//! use chainsparse::{add, multiply, Matrix};
//!
//! fn example() -> chainsparse::Result<()> {
//!     let mut a = Matrix::new(2, 2)?;
//!     let mut cursor = a.set(None, 0, 0, 2.0)?;
//!     cursor = a.set(cursor, 1, 1, 3.0)?;
//!
//!     // Reads anchored at the last cursor resume from there
//!     let (value, _) = a.get(cursor, 1, 1)?;
//!     assert_eq!(value, 3.0);
//!
//!     let b = a.clone();
//!     add(&mut a, &b)?;
//!     let product = multiply(&a, &b)?;
//!     assert_eq!(product.get(None, 1, 1)?.0, 18.0);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Locality-biased lookup**: cold lookups start from the closer end of
//!   the chain, warm lookups from the caller's cursor
//! - **Safe cursors**: stale or foreign cursors are detected and replaced
//! - **Zero-write policy**: zero writes remove entries, or optionally leave
//!   them in place
//! - **Diagnostics**: per-matrix traversal counters and a structural
//!   validator

pub use chainsparse_core::{
    // Core traits
    MatrixOperations, SparseMatrix,
    // Shapes
    Shape,
    // Error handling
    MatrixError, Result,
};

mod chain;
pub mod config;
pub mod cursor;
pub mod matrix;
pub mod ops;
pub mod stats;

pub use config::{MatrixConfig, ZeroWritePolicy};
pub use cursor::Cursor;
pub use matrix::{Entries, Matrix};
pub use ops::{add, multiply};
pub use stats::TraversalStats;
