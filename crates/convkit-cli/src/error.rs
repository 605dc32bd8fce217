use std::path::PathBuf;

use convkit::imgproc::filter::{FilterError, KernelError};
use convkit::io::IoError;

/// An error type for the command line tools.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// The input directory cannot be listed.
    #[error("Failed to load directory: {0}")]
    Directory(PathBuf),

    /// An entry of the input directory cannot be read.
    #[error("Failed to walk directory. {0}")]
    Walk(#[from] walkdir::Error),

    /// The kernel file cannot be loaded.
    #[error("Kernel file failure. {0}")]
    Kernel(#[from] KernelError),

    /// The convolution failed.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// An image could not be read or written.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The output path cannot be derived from the input path.
    #[error("Cannot derive an output name for {input}: '{filter}' not found")]
    OutputName {
        /// Input image path.
        input: PathBuf,
        /// Extension filter that was searched for.
        filter: String,
    },

    /// The configuration is not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
