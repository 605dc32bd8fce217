use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use convkit::imgproc::filter::{apply_repeated, Kernel};
use convkit::io::functional as F;

use crate::{
    config::{BatchConfig, SingleConfig},
    discovery,
    error::CliError,
};

/// An image of a batch that could not be processed.
#[derive(Debug)]
pub struct ImageFailure {
    /// The input image.
    pub input: PathBuf,
    /// What went wrong.
    pub error: CliError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written, in processing order.
    pub written: Vec<PathBuf>,
    /// Images that failed; nothing was written for them.
    pub failures: Vec<ImageFailure>,
}

impl BatchReport {
    /// Returns true if every discovered image was written.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Load, convolve and write one image.
///
/// The output file is only created once every pass has succeeded.
pub fn process_image(
    input: &Path,
    output: &Path,
    kernel: &Kernel,
    passes: NonZeroUsize,
    grayscale: bool,
) -> Result<(), CliError> {
    let image = F::read_image_any(input)?;
    let result = apply_repeated(&image, kernel, passes, grayscale)?;
    F::write_image_any(output, &result)?;

    Ok(())
}

fn load_kernel(path: &Path) -> Result<Kernel, CliError> {
    log::info!("Using kernel: {}", path.display());
    let kernel = Kernel::from_file(path)?;
    log::info!("{kernel}");

    if !kernel.is_centered() {
        log::warn!(
            "kernel is {}x{}; even sizes are anchored at ({}, {})",
            kernel.rows(),
            kernel.cols(),
            kernel.anchor().0,
            kernel.anchor().1
        );
    }

    Ok(kernel)
}

/// Convolve every matching image of a directory.
///
/// Directory and kernel failures abort the run. A failure on one image is
/// recorded in the report and the run continues with the next file.
pub fn run_batch(config: &BatchConfig) -> Result<BatchReport, CliError> {
    log::info!("Current directory: '{}'", config.input_dir.display());
    log::info!("File extension: '{}'", config.extension_filter);

    let files = discovery::find_files(&config.input_dir, &config.extension_filter)?;
    for file in &files {
        log::info!("\t{}", file.display());
    }

    log::info!("Grayscale: {}", config.grayscale);
    log::info!("Passes: {}", config.repeat.passes());

    let kernel = load_kernel(&config.kernel_path)?;
    let passes = config.repeat.passes();

    let pb = indicatif::ProgressBar::new(files.len() as u64);
    pb.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("##>-"),
    );

    let mut report = BatchReport::default();
    for input in files {
        pb.set_message(input.display().to_string());

        let outcome = config
            .naming
            .output_path(&input, &config.extension_filter, &config.output_extension)
            .and_then(|output| {
                process_image(&input, &output, &kernel, passes, config.grayscale)?;
                Ok(output)
            });

        pb.suspend(|| match &outcome {
            Ok(output) => log::info!("{}\t{}\tOK", input.display(), output.display()),
            Err(e) => log::error!("{}\tFAILED\t{e}", input.display()),
        });

        match outcome {
            Ok(output) => report.written.push(output),
            Err(error) => report.failures.push(ImageFailure { input, error }),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    log::info!(
        "Finished procedure: {} written, {} failed",
        report.written.len(),
        report.failures.len()
    );

    Ok(report)
}

/// Convolve a single image and write the result.
///
/// Any failure is returned to the caller.
pub fn run_single(config: &SingleConfig) -> Result<PathBuf, CliError> {
    log::info!("Input file: '{}'", config.input.display());
    log::info!("Output file: '{}'", config.output.display());
    log::info!("Grayscale: {}", config.grayscale);
    log::info!("Passes: {}", config.repeat.passes());

    let kernel = load_kernel(&config.kernel_path)?;

    process_image(
        &config.input,
        &config.output,
        &kernel,
        config.repeat.passes(),
        config.grayscale,
    )?;
    log::info!("{}\tOK", config.output.display());

    Ok(config.output.clone())
}
