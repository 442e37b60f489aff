#![no_std]

//! chainsparse core - shape arithmetic, errors and traits
//!
//! This crate provides the storage-independent definitions shared by
//! cursor-addressed sparse matrices: dimension and offset arithmetic,
//! the error type, and format-agnostic access traits. It performs no
//! allocation unless the `alloc` feature is enabled.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod shape;
pub mod traits;
pub mod validation;

pub use error::*;
pub use shape::Shape;
pub use traits::*;
