use convkit_image::{Image, ImageError};

use super::{FilterError, Kernel};
use crate::{padding::PaddingMode, parallel};

/// Apply a 2D kernel to an image.
///
/// Computes the cross-correlation of every channel with `kernel` (the kernel
/// is not flipped):
///
/// `dst[y][x][c] = sum_{ky,kx} src[y + ky - ay][x + kx - ax][c] * kernel[ky][kx]`
///
/// where `(ay, ax)` is [`Kernel::anchor`]. Samples outside the image take the
/// value of the nearest edge pixel. Terms are accumulated in a fixed order, so
/// the result is identical across runs regardless of thread scheduling.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The kernel to apply.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
///
/// # Example
///
/// ```
/// use convkit_image::{Image, ImageSize};
/// use convkit_imgproc::filter::{filter2d, Kernel};
///
/// let src = Image::<f32, 1>::new(
///     ImageSize { width: 3, height: 1 },
///     vec![1.0, 2.0, 3.0],
/// )
/// .unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// let kernel: Kernel = "0 0 1".parse().unwrap();
/// filter2d(&src, &mut dst, &kernel).unwrap();
///
/// // shifted left by one, the last pixel replicated
/// assert_eq!(dst.as_slice(), &[2.0, 3.0, 3.0]);
/// ```
pub fn filter2d<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel: &Kernel,
) -> Result<(), FilterError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    if src.is_empty() {
        return Err(FilterError::InvalidImage(src.size()));
    }

    if kernel.rows() == 0 || kernel.cols() == 0 {
        return Err(FilterError::InvalidKernel(kernel.rows(), kernel.cols()));
    }

    let border = PaddingMode::Replicate;
    let (rows, cols) = (src.rows(), src.cols());
    let (anchor_y, anchor_x) = kernel.anchor();
    let row_stride = cols * C;
    let src_data = src.as_slice();

    // precompute the source column of every (x, kx) pair
    let col_map = (0..cols)
        .flat_map(|x| {
            (0..kernel.cols())
                .map(move |kx| border.map_index(x as isize + kx as isize - anchor_x as isize, cols))
        })
        .collect::<Vec<_>>();

    parallel::par_fill_rows(dst, |y, dst_row| {
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let mut sum = [0.0f32; C];
            let cols_x = &col_map[x * kernel.cols()..(x + 1) * kernel.cols()];

            for ky in 0..kernel.rows() {
                let sy = border.map_index(y as isize + ky as isize - anchor_y as isize, rows);
                let src_row = &src_data[sy * row_stride..(sy + 1) * row_stride];

                for (&weight, &sx) in kernel.row(ky).iter().zip(cols_x) {
                    let src_pixel = &src_row[sx * C..(sx + 1) * C];
                    for (acc, &val) in sum.iter_mut().zip(src_pixel) {
                        *acc += val * weight;
                    }
                }
            }

            dst_pixel.copy_from_slice(&sum);
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use convkit_image::{Image, ImageSize};

    use crate::filter::{filter2d, FilterError, Kernel};

    fn ramp(width: usize, height: usize) -> Result<Image<f32, 1>, FilterError> {
        let data = (0..width * height).map(|v| v as f32).collect();
        Ok(Image::new(ImageSize { width, height }, data)?)
    }

    #[test]
    fn box_3x3_with_replicated_border() -> Result<(), Box<dyn std::error::Error>> {
        #[rustfmt::skip]
        let src = Image::<f32, 1>::new(
            ImageSize { width: 3, height: 3 },
            vec![
                0.0, 0.0, 0.0,
                0.0, 9.0, 0.0,
                0.0, 0.0, 0.0,
            ],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
        let kernel: Kernel = "1 1 1\n1 1 1\n1 1 1".parse()?;

        filter2d(&src, &mut dst, &kernel)?;
        assert_eq!(dst.as_slice(), &[9.0; 9]);

        Ok(())
    }

    #[test]
    fn corner_replicates_edge() -> Result<(), Box<dyn std::error::Error>> {
        #[rustfmt::skip]
        let src = Image::<f32, 1>::new(
            ImageSize { width: 2, height: 2 },
            vec![
                1.0, 2.0,
                3.0, 4.0,
            ],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
        let kernel: Kernel = "1 0 0\n0 0 0\n0 0 0".parse()?;

        // top-left weight samples (y - 1, x - 1), clamped at the border
        filter2d(&src, &mut dst, &kernel)?;
        assert_eq!(dst.as_slice(), &[1.0, 1.0, 1.0, 1.0]);

        let kernel: Kernel = "0 0 0\n0 0 0\n0 0 1".parse()?;
        filter2d(&src, &mut dst, &kernel)?;
        assert_eq!(dst.as_slice(), &[4.0, 4.0, 4.0, 4.0]);

        Ok(())
    }

    #[test]
    fn correlation_is_not_flipped() -> Result<(), Box<dyn std::error::Error>> {
        let src = ramp(5, 1)?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
        let kernel: Kernel = "-1 0 1".parse()?;

        filter2d(&src, &mut dst, &kernel)?;
        assert_eq!(dst.as_slice(), &[1.0, 2.0, 2.0, 2.0, 1.0]);

        Ok(())
    }

    #[test]
    fn even_kernel_anchor() -> Result<(), Box<dyn std::error::Error>> {
        let src = ramp(4, 1)?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        // anchor at column 1: the footprint covers x - 1 and x
        let kernel: Kernel = "1 0".parse()?;
        filter2d(&src, &mut dst, &kernel)?;
        assert_eq!(dst.as_slice(), &[0.0, 0.0, 1.0, 2.0]);

        let kernel: Kernel = "0 1".parse()?;
        filter2d(&src, &mut dst, &kernel)?;
        assert_eq!(dst.as_slice(), &[0.0, 1.0, 2.0, 3.0]);

        Ok(())
    }

    #[test]
    fn vertical_column_kernel() -> Result<(), Box<dyn std::error::Error>> {
        let src = ramp(2, 3)?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
        let kernel = Kernel::column(vec![0.5, 0.0, 0.5])?;

        filter2d(&src, &mut dst, &kernel)?;
        // rows: [0 1] [2 3] [4 5]
        assert_eq!(dst.as_slice(), &[1.0, 2.0, 2.0, 3.0, 3.0, 4.0]);

        Ok(())
    }

    #[test]
    fn channels_are_independent() -> Result<(), Box<dyn std::error::Error>> {
        let src = Image::<f32, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1.0, 10.0, 100.0, 3.0, 30.0, 300.0],
        )?;
        let mut dst = Image::<f32, 3>::from_size_val(src.size(), 0.0)?;
        let kernel: Kernel = "0.5 0.5 0".parse()?;

        filter2d(&src, &mut dst, &kernel)?;
        let expected = [1.0, 10.0, 100.0, 2.0, 20.0, 200.0];
        for (a, b) in dst.as_slice().iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-5);
        }

        Ok(())
    }

    #[test]
    fn kernel_larger_than_image() -> Result<(), Box<dyn std::error::Error>> {
        let src = Image::<f32, 1>::from_size_val([1, 1].into(), 2.0)?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
        let kernel = Kernel::new(5, 5, vec![1.0; 25])?;

        filter2d(&src, &mut dst, &kernel)?;
        assert_eq!(dst.as_slice(), &[50.0]);

        Ok(())
    }

    #[test]
    fn empty_image_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let src = Image::<f32, 1>::from_size_val([0, 3].into(), 0.0)?;
        let mut dst = src.clone();
        let kernel: Kernel = "1".parse()?;

        assert!(matches!(
            filter2d(&src, &mut dst, &kernel),
            Err(FilterError::InvalidImage(_))
        ));

        Ok(())
    }

    #[test]
    fn size_mismatch_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let src = ramp(3, 3)?;
        let mut dst = ramp(2, 3)?;
        let kernel: Kernel = "1".parse()?;

        assert!(matches!(
            filter2d(&src, &mut dst, &kernel),
            Err(FilterError::Image(_))
        ));

        Ok(())
    }
}
