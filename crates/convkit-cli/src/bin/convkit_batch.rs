use argh::FromArgs;
use std::path::PathBuf;

use convkit_cli::{run_batch, BatchConfig, OutputNaming};

#[derive(FromArgs)]
/// Apply a convolution kernel to a group of images in a directory
struct Args {
    /// input directory from which the files will be grabbed
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// file extension filtering
    #[argh(option, short = 'e')]
    extension: String,

    /// result file extension
    #[argh(option, short = 'o')]
    output: String,

    /// convolution kernel file
    #[argh(option, short = 'k')]
    kernel: PathBuf,

    /// transform to grayscale
    #[argh(switch, short = 'g')]
    grayscale: bool,

    /// repeat the transformation n additional times (0 by default)
    #[argh(option, short = 'r', default = "0")]
    repeat: usize,

    /// only replace the extension at the end of the file name
    #[argh(switch)]
    suffix_aware: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    convkit_cli::init_logging();
    let args: Args = argh::from_env();

    let naming = if args.suffix_aware {
        OutputNaming::Suffix
    } else {
        OutputNaming::FirstMatch
    };

    let config = BatchConfig::new(args.input, args.extension, args.output, args.kernel)?
        .with_grayscale(args.grayscale)
        .with_additional_repeats(args.repeat)
        .with_naming(naming);

    let report = run_batch(&config)?;
    if !report.is_success() {
        log::warn!("{} image(s) could not be processed", report.failures.len());
    }

    Ok(())
}
