use rayon::prelude::*;

use convkit_image::Image;

/// Apply a function to each pixel in the image in parallel.
///
/// The rows of `src` and `dst` are visited in lockstep; `f` receives the
/// channels of one source pixel and of the matching destination pixel.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    src.as_slice()
        .par_chunks_exact(C1 * src.cols())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * src.cols()))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Fill each row of the destination image in parallel.
///
/// `f` receives the row index and the mutable row buffer of `width * C`
/// elements. Rows are written independently, so the result does not depend
/// on how rayon schedules them.
pub fn par_fill_rows<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let row_stride = C * dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(row_stride)
        .enumerate()
        .for_each(|(row, dst_row)| f(row, dst_row));
}

#[cfg(test)]
mod tests {
    use convkit_image::{Image, ImageError, ImageSize};

    #[test]
    fn par_iter_rows_sums_channels() -> Result<(), ImageError> {
        let src = Image::<u8, 2>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1, 2, 3, 4, 5, 6, 7, 8],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        super::par_iter_rows(&src, &mut dst, |s, d| d[0] = s[0] + s[1]);
        assert_eq!(dst.as_slice(), &[3, 7, 11, 15]);

        Ok(())
    }

    #[test]
    fn par_fill_rows_indexes() -> Result<(), ImageError> {
        let mut dst = Image::<usize, 1>::from_size_val([3, 2].into(), 0)?;
        super::par_fill_rows(&mut dst, |row, data| data.iter_mut().for_each(|v| *v = row));
        assert_eq!(dst.as_slice(), &[0, 0, 0, 1, 1, 1]);

        Ok(())
    }
}
