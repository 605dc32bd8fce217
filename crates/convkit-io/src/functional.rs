use std::{io::Cursor, path::Path};

use convkit_image::{DynamicImage, Image, ImageSize};
use image::ImageFormat;

use crate::error::IoError;

/// Decodes an image from an in-memory encoded buffer.
///
/// The format is guessed from the content. Images without color information
/// are returned as [`DynamicImage::Gray8`], everything else as
/// [`DynamicImage::Rgb8`]; alpha channels and bit depths above 8 are dropped.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, IoError> {
    let img = image::load_from_memory(bytes)?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let image = if img.color().has_color() {
        DynamicImage::Rgb8(Image::<u8, 3>::new(size, img.into_rgb8().into_raw())?)
    } else {
        DynamicImage::Gray8(Image::<u8, 1>::new(size, img.into_luma8().into_raw())?)
    };

    Ok(image)
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A grayscale or RGB image, see [`decode_image`].
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<DynamicImage, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)?;
    decode_image(&bytes)
}

fn to_image_crate(src: &DynamicImage) -> Result<image::DynamicImage, IoError> {
    let [width, height]: [u32; 2] = src.size().into();
    let data = src.as_slice().to_vec();
    let shape_error = || {
        IoError::ImageCreationError(convkit_image::ImageError::InvalidChannelShape(
            src.as_slice().len(),
            src.width() * src.height() * src.num_channels(),
        ))
    };

    let out = match src {
        DynamicImage::Gray8(_) => image::DynamicImage::ImageLuma8(
            image::GrayImage::from_raw(width, height, data).ok_or_else(shape_error)?,
        ),
        DynamicImage::Rgb8(_) => image::DynamicImage::ImageRgb8(
            image::RgbImage::from_raw(width, height, data).ok_or_else(shape_error)?,
        ),
    };

    Ok(out)
}

fn encode_with_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, IoError> {
    let mut buffer = Cursor::new(Vec::new());
    to_image_crate(image)?
        .write_to(&mut buffer, format)
        .map_err(IoError::ImageEncodeError)?;

    Ok(buffer.into_inner())
}

/// Encodes an image into the container format named by `extension`.
///
/// The extension is matched case-insensitively and may start with a dot,
/// e.g. `"png"`, `".JPG"`.
pub fn encode_image(image: &DynamicImage, extension: &str) -> Result<Vec<u8>, IoError> {
    let ext = extension.trim_start_matches('.');
    let format = ImageFormat::from_extension(ext)
        .ok_or_else(|| IoError::UnsupportedExtension(extension.to_string()))?;

    encode_with_format(image, format)
}

/// Writes an image to the given file path.
///
/// The container format is chosen from the file extension. The image is fully
/// encoded in memory before the file is created, so a failed encode leaves no
/// file behind.
pub fn write_image_any(file_path: impl AsRef<Path>, image: &DynamicImage) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let format = ImageFormat::from_path(file_path)
        .map_err(|_| IoError::InvalidFileExtension(file_path.to_path_buf()))?;

    let bytes = encode_with_format(image, format)?;
    std::fs::write(file_path, bytes)?;

    Ok(())
}
