/// The border policy used by the sliding window filters.
///
/// Out of bounds samples take the value of the nearest valid pixel, i.e. the
/// outermost row or column is repeated into the padded region.
///
/// Example: ...d c b a | a a a a...
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaddingMode {
    /// Clamp the coordinate to the image edge.
    #[default]
    Replicate,
}

impl PaddingMode {
    /// Maps index `i` to a valid index within `[0, len)`.
    ///
    /// PRECONDITION: `len > 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use convkit_imgproc::padding::PaddingMode;
    ///
    /// assert_eq!(PaddingMode::Replicate.map_index(-2, 5), 0);
    /// assert_eq!(PaddingMode::Replicate.map_index(3, 5), 3);
    /// assert_eq!(PaddingMode::Replicate.map_index(7, 5), 4);
    /// ```
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> usize {
        match self {
            PaddingMode::Replicate => i.clamp(0, len as isize - 1) as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PaddingMode;

    #[test]
    fn replicate_single_pixel() {
        for i in -3..3 {
            assert_eq!(PaddingMode::Replicate.map_index(i, 1), 0);
        }
    }

    #[test]
    fn replicate_in_range_is_identity() {
        for i in 0..6 {
            assert_eq!(PaddingMode::default().map_index(i, 6), i as usize);
        }
    }
}
