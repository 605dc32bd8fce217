use std::path::PathBuf;

use convkit_image::{ImageError, ImageSize};

/// Structural problems found while building a kernel.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MalformedKernel {
    /// A token could not be parsed as a finite number.
    #[error("line {line}: '{token}' is not a finite number")]
    InvalidNumber {
        /// 1-based line number in the kernel text.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A row does not have the same number of columns as the first row.
    #[error("line {line}: expected {expected} values, found {found}")]
    RaggedRow {
        /// 1-based line number in the kernel text.
        line: usize,
        /// Number of columns of the first row.
        expected: usize,
        /// Number of columns of this row.
        found: usize,
    },

    /// A weight given in code is NaN or infinite.
    #[error("value at index {index} is not a finite number")]
    NonFinite {
        /// Row-major index of the offending weight.
        index: usize,
    },

    /// The kernel has no rows or no columns.
    #[error("kernel has no values")]
    Empty,

    /// The data length does not match the declared shape.
    #[error("data length ({len}) does not match the kernel shape ({rows}x{cols})")]
    ShapeMismatch {
        /// Declared rows.
        rows: usize,
        /// Declared columns.
        cols: usize,
        /// Number of values provided.
        len: usize,
    },
}

/// An error type for loading kernels.
#[derive(thiserror::Error, Debug)]
pub enum KernelError {
    /// The kernel file does not exist.
    #[error("Kernel file does not exist: {0}")]
    FileNotFound(PathBuf),

    /// The kernel file could not be read.
    #[error("Failed to read kernel file {path}. {source}")]
    Io {
        /// Path of the kernel file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The kernel text does not describe a rectangular numeric matrix.
    #[error("Malformed kernel: {0}")]
    MalformedKernel(#[from] MalformedKernel),
}

/// An error type for the convolution engine.
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    /// The source image has no pixels.
    #[error("Invalid image: {0} has no pixels")]
    InvalidImage(ImageSize),

    /// The kernel has no rows or no columns.
    #[error("Invalid kernel: {0}x{1} kernel has no values")]
    InvalidKernel(usize, usize),

    /// A convolution pass of a repeated application failed.
    #[error("Convolution failed at pass {pass} of {passes}. {source}")]
    Convolution {
        /// 1-based index of the failing pass.
        pass: usize,
        /// Total number of requested passes.
        passes: usize,
        /// Underlying error.
        #[source]
        source: Box<FilterError>,
    },

    /// An image buffer operation failed.
    #[error(transparent)]
    Image(#[from] ImageError),
}
