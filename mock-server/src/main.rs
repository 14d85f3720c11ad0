use std::time::Duration;

use tokio::net::TcpListener;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let delay = match std::env::var("MOCK_DELAY_MS") {
        Ok(raw) => mock_server::parse_delay_ms(&raw).map_err(|e| {
            std::io::Error::other(format!(
                "MOCK_DELAY_MS must be a whole number of milliseconds, got {raw:?}: {e}"
            ))
        })?,
        Err(_) => Duration::ZERO,
    };
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr} (delay {delay:?})");
    mock_server::run_with(listener, delay).await
}
