use argh::FromArgs;
use std::path::PathBuf;

use convkit_cli::{run_single, SingleConfig};

#[derive(FromArgs)]
/// Apply a convolution kernel to an image
struct Args {
    /// input file to process
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// output file name
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// convolution kernel file (.kernel)
    #[argh(option, short = 'k')]
    kernel: PathBuf,

    /// transform to grayscale before processing
    #[argh(switch, short = 'g')]
    grayscale: bool,

    /// do the convolution n times (1 by default)
    #[argh(option, short = 't', default = "1")]
    times: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    convkit_cli::init_logging();
    let args: Args = argh::from_env();

    let config = SingleConfig::new(args.input, args.output, args.kernel)
        .with_grayscale(args.grayscale)
        .with_total_passes(args.times)?;

    run_single(&config)?;

    Ok(())
}
