use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use convkit::imgproc::filter::{FilterError, KernelError};
use convkit::io::IoError;

/// Failure of a convolution request.
#[derive(thiserror::Error, Debug)]
pub enum ServeError {
    #[error("Invalid request body. {0}")]
    InvalidBody(String),

    #[error("Input is not valid base64. {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid kernel. {0}")]
    Kernel(#[from] KernelError),

    #[error("The number of passes must be at least 1")]
    InvalidTimes,

    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Worker task failed. {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServeError {
    fn status(&self) -> StatusCode {
        match self {
            ServeError::Filter(_) | ServeError::Io(IoError::ImageEncodeError(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServeError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::error!("{status}: {self}");

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
