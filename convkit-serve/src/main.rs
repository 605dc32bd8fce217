mod convolve;
mod error;

use argh::FromArgs;
use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};

/// Largest request body accepted, in bytes.
const MAX_BODY_SIZE: usize = 64 * 1024 * 1024;

#[derive(FromArgs)]
/// Serve convolution requests over HTTP
struct Args {
    /// address to listen on
    #[argh(option, short = 'a', default = "String::from(\"localhost\")")]
    address: String,

    /// port to listen on
    #[argh(option, short = 'p', default = "24111")]
    port: u16,
}

pub(crate) fn app() -> Router {
    Router::new()
        .route(
            "/",
            get(|| async { "Welcome to convkit!" }).post(convolve::convolve),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Args = argh::from_env();

    let listener = tokio::net::TcpListener::bind((args.address.as_str(), args.port)).await?;

    log::info!("🚀 Starting the server");
    log::info!("🔥 Listening on: http://{}", listener.local_addr()?);
    log::info!("🔧 Press Ctrl+C to stop the server");

    axum::serve(listener, app()).await?;

    Ok(())
}
