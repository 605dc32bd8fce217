use crate::{Image, ImageError};

/// Store floating point pixel data as 8-bit samples.
///
/// Each value is rounded to the nearest integer and clamped to `[0, 255]`.
/// NaN values are stored as 0.
pub fn saturate_u8<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(out, &inp)| {
            // `as` saturates and maps NaN to 0
            *out = inp.round().clamp(0.0, 255.0) as u8;
        });

    Ok(())
}
