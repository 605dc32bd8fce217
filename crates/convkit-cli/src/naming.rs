use std::path::{Path, PathBuf};

use crate::error::CliError;

/// How a batch run names its output files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputNaming {
    /// Replace the first occurrence of the extension filter anywhere in the
    /// full path with the output extension.
    ///
    /// This is plain string substitution: with filter `.png`, the input
    /// `shots.png.d/a.png` becomes `shots.jpg.d/a.png`, which does not exist
    /// as a directory and makes the write fail.
    #[default]
    FirstMatch,

    /// Replace the filter only when the file name ends with it, otherwise
    /// append the output extension to the file name. Directories are never
    /// touched.
    Suffix,
}

impl OutputNaming {
    /// Derive the output path for `input`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use convkit_cli::OutputNaming;
    ///
    /// let out = OutputNaming::FirstMatch
    ///     .output_path(Path::new("imgs/a.png"), ".png", ".out.png")
    ///     .unwrap();
    /// assert_eq!(out, Path::new("imgs/a.out.png"));
    /// ```
    pub fn output_path(
        &self,
        input: &Path,
        filter: &str,
        output_extension: &str,
    ) -> Result<PathBuf, CliError> {
        let not_found = || CliError::OutputName {
            input: input.to_path_buf(),
            filter: filter.to_string(),
        };

        match self {
            OutputNaming::FirstMatch => {
                let path = input.to_str().ok_or_else(not_found)?;
                if filter.is_empty() || !path.contains(filter) {
                    return Err(not_found());
                }
                Ok(PathBuf::from(path.replacen(filter, output_extension, 1)))
            }
            OutputNaming::Suffix => {
                let file_name = input
                    .file_name()
                    .and_then(|name| name.to_str())
                    .ok_or_else(not_found)?;
                let stem = file_name.strip_suffix(filter).unwrap_or(file_name);
                Ok(input.with_file_name(format!("{stem}{output_extension}")))
            }
        }
    }
}
