//! Filter operations
//!
//! This module provides the kernel type and the 2D convolution used to apply
//! it to images.

/// Error types for kernel parsing and filtering.
mod error;
pub use error::{FilterError, KernelError, MalformedKernel};

/// Dense convolution kernels and their text format.
mod kernel;
pub use kernel::Kernel;

/// Sliding window weighted sum over image planes.
mod convolution;
pub use convolution::filter2d;

/// Single and repeated kernel application on decoded images.
mod ops;
pub use ops::*;
