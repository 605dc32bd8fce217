use crate::parallel;
use convkit_image::{DynamicImage, Image, ImageError};

/// Fixed point weights for 8-bit input, scaled by 2^14.
const RW_U8: u32 = 4899;
const GW_U8: u32 = 9617;
const BW_U8: u32 = 1868;
const SHIFT_U8: u32 = 14;

/// Convert an RGB8 image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The weights are applied in 14-bit fixed point with round-half-up, so the
/// result is exact for gray input (R = G = B).
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use convkit_image::Image;
/// use convkit_imgproc::color::gray_from_rgb_u8;
///
/// let image = Image::<u8, 3>::new([2, 1].into(), vec![255, 0, 0, 9, 9, 9]).unwrap();
/// let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// gray_from_rgb_u8(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[76, 9]);
/// ```
pub fn gray_from_rgb_u8(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if src.is_empty() {
        return Ok(());
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as u32;
        let g = src_pixel[1] as u32;
        let b = src_pixel[2] as u32;
        let y = r * RW_U8 + g * GW_U8 + b * BW_U8 + (1 << (SHIFT_U8 - 1));
        dst_pixel[0] = (y >> SHIFT_U8) as u8;
    });

    Ok(())
}

/// Get a single channel luminance version of a decoded image.
///
/// Grayscale input is returned as a copy; color input is converted with
/// [`gray_from_rgb_u8`].
pub fn gray_from_dynamic(src: &DynamicImage) -> Result<Image<u8, 1>, ImageError> {
    match src {
        DynamicImage::Gray8(img) => Ok(img.clone()),
        DynamicImage::Rgb8(img) => {
            let mut gray = Image::<u8, 1>::from_size_val(img.size(), 0)?;
            gray_from_rgb_u8(img, &mut gray)?;
            Ok(gray)
        }
    }
}
