#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image filtering module.
pub mod filter;

/// border handling for sliding window operations.
pub mod padding;

/// module containing parallelization utilities.
pub mod parallel;
