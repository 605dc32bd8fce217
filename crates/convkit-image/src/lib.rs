#![deny(missing_docs)]
//! Image types for generating and manipulating images

/// image representation for convolution filtering.
pub mod image;

/// runtime-channel image wrapper produced by decoders.
pub mod dynamic;

/// Error types for the image module.
pub mod error;

/// image operations that write into a preallocated destination.
pub mod ops;

pub use crate::dynamic::DynamicImage;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
