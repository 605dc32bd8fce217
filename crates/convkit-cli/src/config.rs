use std::num::NonZeroUsize;
use std::path::PathBuf;

use convkit::imgproc::filter::RepeatPolicy;

use crate::{error::CliError, naming::OutputNaming};

/// Configuration of a directory batch run.
///
/// The repeat count of a batch run counts *additional* passes: `repeat = 0`
/// applies the kernel once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Directory from which the files are grabbed.
    pub input_dir: PathBuf,
    /// Substring a path must contain to be processed, usually an extension.
    pub extension_filter: String,
    /// Replacement for the filter in the output file name.
    pub output_extension: String,
    /// Path to the kernel text file.
    pub kernel_path: PathBuf,
    /// Convert images to grayscale before filtering.
    pub grayscale: bool,
    /// Number of passes to run.
    pub repeat: RepeatPolicy,
    /// Output path derivation rule.
    pub naming: OutputNaming,
}

impl BatchConfig {
    /// Create a batch configuration with a single pass and no grayscale conversion.
    ///
    /// # Errors
    ///
    /// [`CliError::InvalidConfig`] if the extension filter is empty.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        extension_filter: impl Into<String>,
        output_extension: impl Into<String>,
        kernel_path: impl Into<PathBuf>,
    ) -> Result<Self, CliError> {
        let extension_filter = extension_filter.into();
        if extension_filter.is_empty() {
            return Err(CliError::InvalidConfig(
                "the extension filter must not be empty".to_string(),
            ));
        }

        Ok(Self {
            input_dir: input_dir.into(),
            extension_filter,
            output_extension: output_extension.into(),
            kernel_path: kernel_path.into(),
            grayscale: false,
            repeat: RepeatPolicy::Additional(0),
            naming: OutputNaming::default(),
        })
    }

    /// Convert images to grayscale before filtering.
    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    /// Run the kernel `repeats` more times after the first pass.
    pub fn with_additional_repeats(mut self, repeats: usize) -> Self {
        self.repeat = RepeatPolicy::Additional(repeats);
        self
    }

    /// Set the output path derivation rule.
    pub fn with_naming(mut self, naming: OutputNaming) -> Self {
        self.naming = naming;
        self
    }
}

/// Configuration of a single image run.
///
/// The repeat count of a single run counts *total* passes and must be at
/// least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleConfig {
    /// Image to process.
    pub input: PathBuf,
    /// Path of the result image; its extension selects the format.
    pub output: PathBuf,
    /// Path to the kernel text file.
    pub kernel_path: PathBuf,
    /// Convert the image to grayscale before filtering.
    pub grayscale: bool,
    /// Number of passes to run.
    pub repeat: RepeatPolicy,
}

impl SingleConfig {
    /// Create a single image configuration with one pass and no grayscale conversion.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        kernel_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            kernel_path: kernel_path.into(),
            grayscale: false,
            repeat: RepeatPolicy::Total(NonZeroUsize::MIN),
        }
    }

    /// Convert the image to grayscale before filtering.
    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    /// Run the kernel exactly `times` times.
    ///
    /// # Errors
    ///
    /// [`CliError::InvalidConfig`] if `times` is zero.
    pub fn with_total_passes(mut self, times: usize) -> Result<Self, CliError> {
        let times = NonZeroUsize::new(times).ok_or_else(|| {
            CliError::InvalidConfig("the number of passes must be at least 1".to_string())
        })?;
        self.repeat = RepeatPolicy::Total(times);
        Ok(self)
    }
}
