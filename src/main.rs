//! HTTP server bridging REST calls to a Wiz bulb.
//!
//! Run with: cargo run -- --bulb-ip 192.168.1.100

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wiz_bridge::{BridgeConfig, DEFAULT_PORT, http};

#[derive(Parser)]
#[command(name = "wiz-bridge")]
#[command(about = "Control a Wiz smart bulb over HTTP", long_about = None)]
struct Cli {
    /// IP address of the Wiz bulb
    #[arg(long, env = "WIZ_BULB_IP", default_value_t = BridgeConfig::DEFAULT_BULB_IP)]
    bulb_ip: IpAddr,

    /// UDP port of the Wiz bulb
    #[arg(long, env = "WIZ_BULB_PORT", default_value_t = DEFAULT_PORT)]
    bulb_port: u16,

    /// Address the HTTP server listens on
    #[arg(short, long, env = "WIZ_LISTEN", default_value = "0.0.0.0:3000")]
    listen: SocketAddr,

    /// Directory of static files served outside /api
    #[arg(long, env = "WIZ_STATIC_DIR", default_value = BridgeConfig::DEFAULT_STATIC_DIR)]
    static_dir: PathBuf,

    /// How long to wait for the bulb to answer, in milliseconds
    #[arg(short, long, env = "WIZ_TIMEOUT_MS", default_value = "3000")]
    timeout_ms: u64,
}

impl From<Cli> for BridgeConfig {
    fn from(cli: Cli) -> Self {
        BridgeConfig {
            bulb_ip: cli.bulb_ip,
            bulb_port: cli.bulb_port,
            listen: cli.listen,
            static_dir: cli.static_dir,
            timeout: Duration::from_millis(cli.timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    let config = BridgeConfig::from(Cli::parse());
    let bulb = config.bulb();
    let app = http::router(bulb.clone(), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;

    info!("Wiz bridge running on http://{}", config.listen);
    info!("Controlling bulb at: {}", bulb.target());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    info!("shut down");
    Ok(())
}

/// `RUST_LOG` directives when present and valid, `info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honors_plain_debug() {
        let filter = log_filter(Some("debug".to_string()));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_log_filter_enables_library_trace() {
        let filter = log_filter(Some("wiz_bridge=trace".to_string()));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }
}
