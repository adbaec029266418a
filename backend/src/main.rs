//! Backend entry-point: configuration, tracing, and server startup.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::server::{self, AppConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    // A missing credential blob is fatal; nothing can authenticate without it.
    let config = AppConfig::from_env()
        .map_err(|err| std::io::Error::other(format!("configuration error: {err}")))?;

    let server = server::run(config).await?;
    server.await
}
