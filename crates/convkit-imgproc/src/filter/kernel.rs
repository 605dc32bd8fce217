use std::{fmt, path::Path, str::FromStr};

use super::error::{KernelError, MalformedKernel};

/// A dense 2D convolution kernel.
///
/// The weights are stored row-major. A kernel always has at least one row and
/// one column and every row has the same number of columns.
///
/// The kernel is anchored at `(rows / 2, cols / 2)`. For odd sizes this is the
/// center; for even sizes the anchor sits on the lower-right of the two middle
/// elements, so the footprint extends one element further up and left than
/// down and right.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Fails with [`MalformedKernel::Empty`] for a zero dimension, with
    /// [`MalformedKernel::ShapeMismatch`] when `data.len() != rows * cols` and
    /// with [`MalformedKernel::NonFinite`] for a NaN or infinite weight.
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, KernelError> {
        if rows == 0 || cols == 0 {
            return Err(MalformedKernel::Empty.into());
        }

        if data.len() != rows * cols {
            return Err(MalformedKernel::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            }
            .into());
        }

        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(MalformedKernel::NonFinite { index }.into());
        }

        Ok(Self { rows, cols, data })
    }

    /// Create a kernel from a list of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use convkit_imgproc::filter::Kernel;
    ///
    /// let kernel = Kernel::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
    /// assert_eq!(kernel.rows(), 2);
    /// assert_eq!(kernel.row(1), &[2.0, 3.0]);
    /// ```
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, KernelError> {
        let expected = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * expected);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(MalformedKernel::RaggedRow {
                    line: i + 1,
                    expected,
                    found: row.len(),
                }
                .into());
            }
            data.extend_from_slice(row);
        }

        Kernel::new(rows.len(), expected, data)
    }

    /// Create a single column kernel (`n x 1`) from a flat list of weights.
    pub fn column(values: Vec<f32>) -> Result<Self, KernelError> {
        Kernel::new(values.len(), 1, values)
    }

    /// Read a kernel from a text file.
    ///
    /// Each non-empty line is a row; values within a line are separated by
    /// arbitrary whitespace.
    ///
    /// # Errors
    ///
    /// [`KernelError::FileNotFound`] if the path does not exist,
    /// [`KernelError::Io`] if it cannot be read and
    /// [`KernelError::MalformedKernel`] if the content is not a rectangular
    /// numeric matrix. Bytes that are not valid UTF-8 are reported as an
    /// invalid number on their line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KernelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(KernelError::FileNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|source| KernelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let text = String::from_utf8(bytes)
            .map_err(|e| invalid_utf8(e.as_bytes(), e.utf8_error().valid_up_to()))?;

        text.parse()
    }

    /// Number of rows of the kernel.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns of the kernel.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The `(row, col)` position aligned with the output pixel.
    pub fn anchor(&self) -> (usize, usize) {
        (self.rows / 2, self.cols / 2)
    }

    /// Returns true if both dimensions are odd, i.e. the anchor is centered.
    pub fn is_centered(&self) -> bool {
        self.rows % 2 == 1 && self.cols % 2 == 1
    }

    /// The weights of row `r`.
    ///
    /// PRECONDITION: `r < self.rows()`.
    pub fn row(&self, r: usize) -> &[f32] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// The row-major weights.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Locate the token holding the first invalid UTF-8 sequence at `offset`.
fn invalid_utf8(bytes: &[u8], offset: usize) -> MalformedKernel {
    let (before, after) = bytes.split_at(offset);
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let start = before
        .iter()
        .rposition(u8::is_ascii_whitespace)
        .map_or(0, |i| i + 1);
    let end = after
        .iter()
        .position(u8::is_ascii_whitespace)
        .map_or(bytes.len(), |i| offset + i);

    MalformedKernel::InvalidNumber {
        line,
        token: String::from_utf8_lossy(&bytes[start..end]).into_owned(),
    }
}

impl FromStr for Kernel {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<f32>> = Vec::new();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let row = line
                .split_whitespace()
                .map(|token| match token.parse::<f32>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    _ => Err(MalformedKernel::InvalidNumber {
                        line: line_no,
                        token: token.to_string(),
                    }),
                })
                .collect::<Result<Vec<f32>, _>>()?;

            if row.is_empty() {
                continue;
            }

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(MalformedKernel::RaggedRow {
                        line: line_no,
                        expected: first.len(),
                        found: row.len(),
                    }
                    .into());
                }
            }

            rows.push(row);
        }

        Kernel::from_rows(rows)
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for r in 0..self.rows {
            if r > 0 {
                write!(f, ";\n ")?;
            }
            let values = self
                .row(r)
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>();
            write!(f, "{}", values.join(", "))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::Kernel;
    use crate::filter::{KernelError, MalformedKernel};

    #[test]
    fn parse_sharpen() -> Result<(), KernelError> {
        let kernel: Kernel = "0 -1 0\n-1 5 -1\n0 -1 0\n".parse()?;
        assert_eq!(kernel.rows(), 3);
        assert_eq!(kernel.cols(), 3);
        assert_eq!(kernel.anchor(), (1, 1));
        assert!(kernel.is_centered());
        assert_eq!(kernel.row(1), &[-1.0, 5.0, -1.0]);
        Ok(())
    }

    #[test]
    fn parse_arbitrary_whitespace() -> Result<(), KernelError> {
        let kernel: Kernel = "\n  0.5\t0.25 \r\n\n1e-1   -2\r\n   \n".parse()?;
        assert_eq!(kernel.rows(), 2);
        assert_eq!(kernel.cols(), 2);
        assert_eq!(kernel.as_slice(), &[0.5, 0.25, 0.1, -2.0]);
        Ok(())
    }

    #[test]
    fn parse_round_trip() -> Result<(), KernelError> {
        let rows = vec![
            vec![0.1f32, -3.25, 1e-7, 42.0],
            vec![1.0 / 3.0, 0.0, -0.0, 7.5e3],
        ];
        let text = rows
            .iter()
            .map(|r| r.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n");

        let kernel: Kernel = text.parse()?;
        assert_eq!(kernel, Kernel::from_rows(rows)?);
        Ok(())
    }

    #[test]
    fn reject_ragged_rows() {
        let res = "1 2 3\n4 5\n6 7 8".parse::<Kernel>();
        assert!(matches!(
            res,
            Err(KernelError::MalformedKernel(MalformedKernel::RaggedRow {
                line: 2,
                expected: 3,
                found: 2
            }))
        ));

        let res = "1 2\n\n3 4 5".parse::<Kernel>();
        assert!(matches!(
            res,
            Err(KernelError::MalformedKernel(MalformedKernel::RaggedRow {
                line: 3,
                ..
            }))
        ));
    }

    #[test]
    fn reject_bad_tokens() {
        for text in ["1 x 3", "1 2 3,", "nan 1", "1 inf"] {
            assert!(
                matches!(
                    text.parse::<Kernel>(),
                    Err(KernelError::MalformedKernel(
                        MalformedKernel::InvalidNumber { line: 1, .. }
                    ))
                ),
                "{text}"
            );
        }
    }

    #[test]
    fn reject_empty() {
        for text in ["", "\n\n", "   \t\n"] {
            assert!(matches!(
                text.parse::<Kernel>(),
                Err(KernelError::MalformedKernel(MalformedKernel::Empty))
            ));
        }
        assert!(matches!(
            Kernel::from_rows(vec![vec![]]),
            Err(KernelError::MalformedKernel(MalformedKernel::Empty))
        ));
    }

    #[test]
    fn new_checks_shape() {
        assert!(matches!(
            Kernel::new(2, 2, vec![1.0; 3]),
            Err(KernelError::MalformedKernel(MalformedKernel::ShapeMismatch {
                rows: 2,
                cols: 2,
                len: 3
            }))
        ));
    }

    #[test]
    fn new_rejects_non_finite() {
        assert!(matches!(
            Kernel::new(1, 3, vec![1.0, f32::NAN, 2.0]),
            Err(KernelError::MalformedKernel(MalformedKernel::NonFinite {
                index: 1
            }))
        ));
        assert!(matches!(
            Kernel::column(vec![0.0, 1.0, f32::INFINITY]),
            Err(KernelError::MalformedKernel(MalformedKernel::NonFinite {
                index: 2
            }))
        ));
    }

    #[test]
    fn column_kernel() -> Result<(), KernelError> {
        let kernel = Kernel::column(vec![1.0, 2.0, 3.0, 4.0])?;
        assert_eq!((kernel.rows(), kernel.cols()), (4, 1));
        assert_eq!(kernel.anchor(), (2, 0));
        assert!(!kernel.is_centered());
        Ok(())
    }

    #[test]
    fn display_matrix() -> Result<(), KernelError> {
        let kernel: Kernel = "0 -1\n2.5 3".parse()?;
        assert_eq!(kernel.to_string(), "[0, -1;\n 2.5, 3]");
        Ok(())
    }

    #[test]
    fn from_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "1 1 1")?;
        writeln!(file, "1 1 1")?;
        writeln!(file, "1 1 1")?;

        let kernel = Kernel::from_file(file.path())?;
        assert_eq!(kernel.as_slice(), &[1.0; 9]);
        Ok(())
    }

    #[test]
    fn from_file_invalid_utf8() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"1 2\n3 \xff4\n")?;

        match Kernel::from_file(file.path()) {
            Err(KernelError::MalformedKernel(MalformedKernel::InvalidNumber { line, token })) => {
                assert_eq!(line, 2);
                assert_eq!(token, "\u{FFFD}4");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn from_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.kernel");
        assert!(matches!(
            Kernel::from_file(&path),
            Err(KernelError::FileNotFound(p)) if p == path
        ));
    }
}
