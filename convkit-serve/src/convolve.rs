use std::num::NonZeroUsize;

use axum::extract::{rejection::JsonRejection, Json};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;

use convkit::imgproc::filter::{apply_repeated, Kernel};
use convkit::io::functional as F;

use crate::error::ServeError;

/// Kernel coefficients, either as rows or as a flat list forming one column.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum KernelPayload {
    Rows(Vec<Vec<f32>>),
    Flat(Vec<f32>),
}

impl TryFrom<KernelPayload> for Kernel {
    type Error = ServeError;

    fn try_from(payload: KernelPayload) -> Result<Self, Self::Error> {
        let kernel = match payload {
            KernelPayload::Rows(rows) => Kernel::from_rows(rows)?,
            KernelPayload::Flat(values) => Kernel::column(values)?,
        };
        Ok(kernel)
    }
}

#[derive(Debug, Deserialize)]
pub struct ConvolveRequest {
    /// encoded input image, base64
    input: String,
    kernel: KernelPayload,
    /// container format of the response image
    #[serde(default = "default_extension")]
    extension: String,
    /// total number of passes
    #[serde(default = "default_times")]
    times: usize,
    #[serde(default)]
    grayscale: bool,
}

fn default_extension() -> String {
    ".png".to_string()
}

fn default_times() -> usize {
    1
}

fn process(request: ConvolveRequest) -> Result<String, ServeError> {
    let passes = NonZeroUsize::new(request.times).ok_or(ServeError::InvalidTimes)?;
    let kernel = Kernel::try_from(request.kernel)?;
    let bytes = STANDARD.decode(request.input.as_bytes())?;

    let image = F::decode_image(&bytes)?;
    log::info!(
        "convolving {}x{}x{} image, kernel {}x{}, passes: {passes}, grayscale: {}",
        image.width(),
        image.height(),
        image.num_channels(),
        kernel.rows(),
        kernel.cols(),
        request.grayscale
    );

    let result = apply_repeated(&image, &kernel, passes, request.grayscale)?;
    let encoded = F::encode_image(&result, &request.extension)?;

    Ok(STANDARD.encode(encoded))
}

/// Convolve the uploaded image and reply with the base64 encoded result.
pub async fn convolve(
    payload: Result<Json<ConvolveRequest>, JsonRejection>,
) -> Result<String, ServeError> {
    let Json(request) = payload.map_err(|e| ServeError::InvalidBody(e.body_text()))?;

    tokio::task::spawn_blocking(move || process(request)).await?
}
