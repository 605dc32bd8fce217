#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Immutable run configurations built from the command line.
pub mod config;

/// Input file discovery.
pub mod discovery;

/// Error types for the command line tools.
pub mod error;

/// Output path derivation for batch runs.
pub mod naming;

/// Load, convolve and write images.
pub mod runner;

pub use crate::config::{BatchConfig, SingleConfig};
pub use crate::error::CliError;
pub use crate::naming::OutputNaming;
pub use crate::runner::{run_batch, run_single, BatchReport, ImageFailure};

/// Initialise `env_logger`, defaulting to the `info` level when `RUST_LOG` is unset.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
