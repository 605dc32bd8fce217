use std::num::NonZeroUsize;

use convkit_image::{ops, DynamicImage, Image, ImageSize};

use super::{filter2d, FilterError, Kernel};
use crate::color;

/// How a user supplied repeat count maps to a number of convolution passes.
///
/// The directory batch tool and the single image tool count repeats
/// differently; both conventions are kept and resolved here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatPolicy {
    /// Run the kernel once plus `n` additional times (`n + 1` passes).
    Additional(usize),
    /// Run the kernel exactly `n` times.
    Total(NonZeroUsize),
}

impl RepeatPolicy {
    /// The number of passes to run.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::num::NonZeroUsize;
    /// use convkit_imgproc::filter::RepeatPolicy;
    ///
    /// assert_eq!(RepeatPolicy::Additional(0).passes().get(), 1);
    /// assert_eq!(RepeatPolicy::Additional(2).passes().get(), 3);
    /// assert_eq!(RepeatPolicy::Total(NonZeroUsize::MIN).passes().get(), 1);
    /// ```
    pub fn passes(&self) -> NonZeroUsize {
        match *self {
            RepeatPolicy::Additional(n) => NonZeroUsize::MIN.saturating_add(n),
            RepeatPolicy::Total(n) => n,
        }
    }
}

impl Default for RepeatPolicy {
    fn default() -> Self {
        RepeatPolicy::Total(NonZeroUsize::MIN)
    }
}

fn check_inputs(size: ImageSize, kernel: &Kernel) -> Result<(), FilterError> {
    if size.is_empty() {
        return Err(FilterError::InvalidImage(size));
    }

    if kernel.rows() == 0 || kernel.cols() == 0 {
        return Err(FilterError::InvalidKernel(kernel.rows(), kernel.cols()));
    }

    Ok(())
}

/// Convolve an 8-bit image with a kernel.
///
/// The samples are promoted to `f32`, filtered with [`filter2d`] and stored
/// back rounded to the nearest integer and clamped to `[0, 255]`.
///
/// # Returns
///
/// A new image with the same size and number of channels as `src`.
pub fn convolve<const C: usize>(
    src: &Image<u8, C>,
    kernel: &Kernel,
) -> Result<Image<u8, C>, FilterError> {
    check_inputs(src.size(), kernel)?;

    let src_f32 = src.cast_and_scale::<f32>(1.0)?;
    let mut dst_f32 = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
    filter2d(&src_f32, &mut dst_f32, kernel)?;

    let mut dst = Image::<u8, C>::from_size_val(src.size(), 0)?;
    ops::saturate_u8(&dst_f32, &mut dst)?;

    Ok(dst)
}

/// Apply a kernel once to a decoded image.
///
/// # Errors
///
/// [`FilterError::InvalidImage`] if the image has no pixels and
/// [`FilterError::InvalidKernel`] if the kernel has no values.
///
/// # Example
///
/// ```
/// use convkit_image::{DynamicImage, Image, ImageSize};
/// use convkit_imgproc::filter::{apply, Kernel};
///
/// let image = DynamicImage::Gray8(
///     Image::new(ImageSize { width: 3, height: 1 }, vec![0, 30, 60]).unwrap(),
/// );
/// let kernel: Kernel = "0.5 0.5 0".parse().unwrap();
///
/// let out = apply(&image, &kernel).unwrap();
/// assert_eq!(out.as_slice(), &[0, 15, 45]);
/// ```
pub fn apply(image: &DynamicImage, kernel: &Kernel) -> Result<DynamicImage, FilterError> {
    let out = match image {
        DynamicImage::Gray8(img) => DynamicImage::Gray8(convolve(img, kernel)?),
        DynamicImage::Rgb8(img) => DynamicImage::Rgb8(convolve(img, kernel)?),
    };

    Ok(out)
}

/// Apply a kernel `passes` times, optionally converting to grayscale first.
///
/// The grayscale conversion happens once, before the first pass, so with
/// `grayscale` set every pass runs on a single channel image. The output of
/// each pass is the input of the next one.
///
/// # Errors
///
/// The image and kernel are validated before any pass runs. If a pass fails
/// the whole operation fails with [`FilterError::Convolution`] and no partial
/// result is returned.
pub fn apply_repeated(
    image: &DynamicImage,
    kernel: &Kernel,
    passes: NonZeroUsize,
    grayscale: bool,
) -> Result<DynamicImage, FilterError> {
    check_inputs(image.size(), kernel)?;

    let mut current = if grayscale {
        DynamicImage::Gray8(color::gray_from_dynamic(image)?)
    } else {
        image.clone()
    };

    let passes = passes.get();
    for pass in 1..=passes {
        log::trace!("convolution pass {pass}/{passes}");
        current = apply(&current, kernel).map_err(|e| FilterError::Convolution {
            pass,
            passes,
            source: Box::new(e),
        })?;
    }

    Ok(current)
}
