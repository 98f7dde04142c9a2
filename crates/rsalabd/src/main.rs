//! rsalabd: RSA lab HTTP service
//!
//! Usage:
//!   rsalabd [--config /etc/rsalab/config.toml] [--listen 0.0.0.0:3001]
//!
//! Serves the JSON API consumed by the browser frontend plus a separate
//! Prometheus/health listener.

mod auth;
mod error;
mod extract;
mod metrics;
mod routes;
mod server;
mod state;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "rsalabd", version, about = "RSA lab HTTP service")]
struct Cli {
    /// Path to rsalab.toml configuration file
    #[arg(
        long,
        short = 'c',
        env = "RSALAB_CONFIG",
        default_value = "/etc/rsalab/config.toml"
    )]
    config: PathBuf,

    /// Override the API listen address from the config file
    #[arg(long, env = "RSALAB_LISTEN")]
    listen: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides server.log_level
    #[arg(long, env = "RSALAB_LOG")]
    log: Option<String>,

    /// Log format (json, text); overrides server.log_format
    #[arg(long, env = "RSALAB_LOG_FORMAT")]
    log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // server.log_level / server.log_format live in the file
    let mut config = rsalab_core::config::RsaLabConfig::load(&cli.config)?;
    if let Some(listen) = cli.listen {
        config.server.listen = listen;
    }

    let level = cli.log.unwrap_or_else(|| config.server.log_level.clone());
    let format = cli.log_format.unwrap_or(match config.server.log_format.as_str() {
        "text" => LogFormat::Text,
        _ => LogFormat::Json,
    });
    init_logging(&level, &format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        config_found = cli.config.exists(),
        "rsalabd starting"
    );

    server::run(config).await
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();
        }
    }
}
