//! Apply 2D convolution kernels to images.
//!
//! ```
//! use std::num::NonZeroUsize;
//! use convkit::image::{DynamicImage, Image};
//! use convkit::imgproc::filter::{apply_repeated, Kernel};
//!
//! let image = DynamicImage::Rgb8(Image::from_size_val([3, 3].into(), 0u8).unwrap());
//! let kernel: Kernel = "0 0 0\n0 1 0\n0 0 0".parse().unwrap();
//!
//! let out = apply_repeated(&image, &kernel, NonZeroUsize::MIN, false).unwrap();
//! assert_eq!(out, image);
//! ```

#[doc(inline)]
pub use convkit_image as image;

#[doc(inline)]
pub use convkit_imgproc as imgproc;

#[doc(inline)]
pub use convkit_io as io;
