use crate::{Image, ImageSize};

/// An 8-bit image whose channel count is only known at runtime.
///
/// Decoders produce either a single channel luminance image or a three
/// channel color image; the convolution engine preserves the variant.
#[derive(Clone, Debug, PartialEq)]
pub enum DynamicImage {
    /// 8-bit grayscale image
    Gray8(Image<u8, 1>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
}

impl DynamicImage {
    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            DynamicImage::Gray8(img) => img.size(),
            DynamicImage::Rgb8(img) => img.size(),
        }
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size().width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size().height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        match self {
            DynamicImage::Gray8(img) => img.num_channels(),
            DynamicImage::Rgb8(img) => img.num_channels(),
        }
    }

    /// Get the raw interleaved pixel data.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            DynamicImage::Gray8(img) => img.as_slice(),
            DynamicImage::Rgb8(img) => img.as_slice(),
        }
    }

    /// Returns true if the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }
}

impl From<Image<u8, 1>> for DynamicImage {
    fn from(image: Image<u8, 1>) -> Self {
        DynamicImage::Gray8(image)
    }
}

impl From<Image<u8, 3>> for DynamicImage {
    fn from(image: Image<u8, 3>) -> Self {
        DynamicImage::Rgb8(image)
    }
}

#[cfg(test)]
mod tests {
    use super::DynamicImage;
    use crate::{Image, ImageError, ImageSize};

    #[test]
    fn dynamic_image_accessors() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let gray: DynamicImage = Image::<u8, 1>::from_size_val(size, 9)?.into();
        let rgb: DynamicImage = Image::<u8, 3>::from_size_val(size, 1)?.into();

        assert_eq!(gray.size(), size);
        assert_eq!(gray.num_channels(), 1);
        assert_eq!(gray.as_slice().len(), 6);
        assert_eq!(rgb.num_channels(), 3);
        assert_eq!(rgb.as_slice().len(), 18);
        assert!(!rgb.is_empty());

        Ok(())
    }
}
